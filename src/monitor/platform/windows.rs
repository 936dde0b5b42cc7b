//! Windows change source using `NotifyIpInterfaceChange`.

use crate::monitor::{ChangeEvent, ChangeSource, SourceError};
use std::pin::Pin;
use std::sync::mpsc;
use std::task::{Context, Poll};
use tokio::sync::mpsc as tokio_mpsc;
use tokio_stream::Stream;
use windows::Win32::Foundation::{HANDLE, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    CancelMibChangeNotify2, MIB_IPINTERFACE_ROW, MIB_NOTIFICATION_TYPE, NotifyIpInterfaceChange,
};
use windows::Win32::Networking::WinSock::AF_UNSPEC;

/// Windows implementation of [`ChangeSource`] using `NotifyIpInterfaceChange`.
///
/// The IP Helper callback runs on a Windows thread-pool thread; each call
/// is forwarded to the stream as one [`ChangeEvent`].
#[derive(Debug, Default)]
pub struct WindowsChangeSource {
    _private: (),
}

impl WindowsChangeSource {
    /// Creates a new Windows change source.
    ///
    /// Registration happens in `into_stream`; a registration failure is
    /// delivered as the stream's first item.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl ChangeSource for WindowsChangeSource {
    type Stream = WindowsChangeStream;

    fn into_stream(self) -> Self::Stream {
        WindowsChangeStream::new()
    }
}

/// Stream of IP interface change notifications from Windows.
pub struct WindowsChangeStream {
    receiver: tokio_mpsc::UnboundedReceiver<Result<ChangeEvent, SourceError>>,
    /// Cancels the registration on drop.
    handle: Option<NotificationHandle>,
    terminated: bool,
}

impl std::fmt::Debug for WindowsChangeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsChangeStream")
            .field("terminated", &self.terminated)
            .field("has_handle", &self.handle.is_some())
            .finish_non_exhaustive()
    }
}

/// Owns the registration and the context leaked to the callback.
struct NotificationHandle {
    handle: HANDLE,
    context_ptr: *mut CallbackContext,
}

impl Drop for NotificationHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from NotifyIpInterfaceChange and is cancelled once.
        let _ = unsafe { CancelMibChangeNotify2(self.handle) };

        // SAFETY: after cancellation returns the callback never fires again.
        // Dropping the context closes the sync channel, ending the bridge thread.
        drop(unsafe { Box::from_raw(self.context_ptr) });
    }
}

// SAFETY: CancelMibChangeNotify2 may be called from any thread.
unsafe impl Send for NotificationHandle {}

struct CallbackContext {
    sender: mpsc::Sender<()>,
}

impl WindowsChangeStream {
    fn new() -> Self {
        // Callback side is a plain thread; bridge it into tokio
        let (sync_tx, sync_rx) = mpsc::channel::<()>();
        let (async_tx, async_rx) = tokio_mpsc::unbounded_channel();

        let bridge_tx = async_tx.clone();
        std::thread::spawn(move || {
            while sync_rx.recv().is_ok() {
                if bridge_tx.send(Ok(ChangeEvent)).is_err() {
                    break;
                }
            }
        });

        // A failed registration is delivered as the first item, ending the stream
        let handle = match register_notification(sync_tx) {
            Ok((handle, context_ptr)) => Some(NotificationHandle {
                handle,
                context_ptr,
            }),
            Err(e) => {
                tracing::warn!("NotifyIpInterfaceChange registration failed: {e}");
                let _ = async_tx.send(Err(e));
                None
            }
        };

        Self {
            receiver: async_rx,
            handle,
            terminated: false,
        }
    }
}

impl Stream for WindowsChangeStream {
    type Item = Result<ChangeEvent, SourceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.receiver).poll_recv(cx) {
            Poll::Ready(Some(Ok(event))) => Poll::Ready(Some(Ok(event))),
            Poll::Ready(Some(Err(e))) => {
                self.terminated = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                self.terminated = true;
                Poll::Ready(Some(Err(SourceError::Stopped)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Registers the callback, returning the handle and the leaked context.
///
/// The caller reclaims the context after `CancelMibChangeNotify2`.
#[cfg(not(tarpaulin_include))]
fn register_notification(
    sender: mpsc::Sender<()>,
) -> Result<(HANDLE, *mut CallbackContext), SourceError> {
    let context_ptr = Box::into_raw(Box::new(CallbackContext { sender }));
    let void_ptr = context_ptr.cast::<std::ffi::c_void>();

    let mut handle = HANDLE::default();

    // SAFETY: callback and context stay valid until the handle is cancelled.
    let result = unsafe {
        NotifyIpInterfaceChange(
            AF_UNSPEC,
            Some(ip_interface_change_callback),
            Some(void_ptr),
            false, // InitialNotification
            &raw mut handle,
        )
    };

    if result != NO_ERROR {
        // SAFETY: registration failed, so Windows holds no reference to the context
        drop(unsafe { Box::from_raw(context_ptr) });
        return Err(windows::core::Error::from(WIN32_ERROR(result.0)).into());
    }

    Ok((handle, context_ptr))
}

/// Called by Windows on a thread-pool thread for every interface change.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn ip_interface_change_callback(
    caller_context: *const std::ffi::c_void,
    _row: *const MIB_IPINTERFACE_ROW,
    _notification_type: MIB_NOTIFICATION_TYPE,
) {
    if caller_context.is_null() {
        return;
    }

    // SAFETY: caller_context is the CallbackContext passed at registration.
    let context = unsafe { &*(caller_context.cast::<CallbackContext>()) };

    // Receiver may already be gone during shutdown
    let _ = context.sender.send(());
}
