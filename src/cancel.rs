//! Cancellation token for the render loop, and the signal listener that
//! trips it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use enough::{Stop, StopReason};

/// Shared flag checked by the render loop between cycles.
///
/// Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Stop for CancelToken {
    fn check(&self) -> Result<(), StopReason> {
        if self.is_cancelled() {
            Err(StopReason::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Route `SIGINT` and `SIGTERM` to `token`.
///
/// Blocks both signals on the calling thread and starts a listener thread
/// that waits for them with `sigwait` and cancels the token. Call this
/// before spawning any other thread so they inherit the mask.
pub fn spawn_signal_listener(token: CancelToken) -> Result<(), crate::FbError> {
    use std::{io, mem, ptr, thread};

    // SAFETY: sigset_t is plain data; sigemptyset initialises it before use.
    let set = unsafe {
        let mut set: libc::sigset_t = mem::zeroed();
        libc::sigemptyset(&mut set);
        libc::sigaddset(&mut set, libc::SIGINT);
        libc::sigaddset(&mut set, libc::SIGTERM);
        set
    };
    // SAFETY: `set` is initialised and the old mask is not requested.
    let rc = unsafe { libc::pthread_sigmask(libc::SIG_BLOCK, &set, ptr::null_mut()) };
    if rc != 0 {
        return Err(io::Error::from_raw_os_error(rc).into());
    }

    thread::Builder::new()
        .name("signal-listener".into())
        .spawn(move || {
            loop {
                let mut sig: libc::c_int = 0;
                // SAFETY: `set` outlives the call and `sig` is a valid out pointer.
                let rc = unsafe { libc::sigwait(&set, &mut sig) };
                if rc != 0 {
                    log::error!("sigwait failed: {}", io::Error::from_raw_os_error(rc));
                    return;
                }
                log::info!("Interrupt detected.");
                token.cancel();
            }
        })?;
    Ok(())
}
