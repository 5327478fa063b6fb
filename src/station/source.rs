/// An async source of received CAN frames. A weather station only listens,
/// so unlike a full bus driver this has no transmit half.
pub trait FrameSource {
    type Error;

    type Frame: embedded_can::Frame;

    async fn receive(&mut self) -> Result<Self::Frame, Self::Error>;
}

impl<T> FrameSource for &mut T
where
    T: FrameSource,
{
    type Error = T::Error;
    type Frame = T::Frame;

    async fn receive(&mut self) -> Result<Self::Frame, Self::Error> {
        (*self).receive().await
    }
}
