use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// The server keeps serving until the handle is dropped. The actor owns the handle, so the peer
/// server goes down together with the state machine.
pub(crate) fn shutdown_signal() -> (RpcServerShutdownHandle, RpcServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (RpcServerShutdownHandle { _tx: tx }, RpcServerShutdownSignal { rx })
}

pub(crate) struct RpcServerShutdownHandle {
    _tx: oneshot::Sender<()>,
}

pub(crate) struct RpcServerShutdownSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for RpcServerShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Sent or dropped, both mean stop.
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}
