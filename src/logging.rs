use std::io::{Error, ErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};

static mut MESSENGER: &dyn Messenger = &NopMessenger;

static STATE: AtomicUsize = AtomicUsize::new(0);

pub fn set_messenger(logger: &'static dyn Messenger) -> std::io::Result<()> {
    set_messenger_inner(|| logger)
}

pub fn set_boxed_messenger(logger: Box<dyn Messenger>) -> std::io::Result<()> {
    set_messenger_inner(|| Box::leak(logger))
}

fn set_messenger_error() -> std::io::Result<()> {
    Err(Error::new(
        ErrorKind::Other,
        format!("failed to set messenger"),
    ))
}

fn set_messenger_inner<F>(make_logger: F) -> std::io::Result<()>
where
    F: FnOnce() -> &'static dyn Messenger,
{
    let old_state = match STATE.compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst) {
        Ok(s) | Err(s) => s,
    };
    match old_state {
        0 => {
            unsafe {
                MESSENGER = make_logger();
            }
            STATE.store(2, Ordering::SeqCst);
            Ok(())
        }
        1 => {
            while STATE.load(Ordering::SeqCst) == 1 {
                std::hint::spin_loop();
            }
            set_messenger_error()
        }
        _ => set_messenger_error(),
    }
}

pub fn messenger() -> &'static dyn Messenger {
    if STATE.load(Ordering::SeqCst) != 2 {
        static NOP: NopMessenger = NopMessenger;
        &NOP
    } else {
        unsafe { MESSENGER }
    }
}

pub trait Messenger {
    fn message(&self, message: &str);
    fn diagnostic(&self, message: &str);

    fn start_progress_percent(&self, message: &str) -> Box<dyn ProgressPercent>;
}

pub trait ProgressPercent {
    fn change_message(&self, new_message: &str);
    fn progress_percent(&self, percent: f64);
    fn finish(&self);
}

struct NopMessenger;
impl Messenger for NopMessenger {
    fn message(&self, _message: &str) {}
    fn diagnostic(&self, _message: &str) {}

    fn start_progress_percent(&self, _message: &str) -> Box<dyn ProgressPercent> {
        Box::new(NopProgressPercent)
    }
}

struct NopProgressPercent;
impl ProgressPercent for NopProgressPercent {
    fn change_message(&self, _new_message: &str) {}
    fn progress_percent(&self, _percent: f64) {}
    fn finish(&self) {}
}

#[macro_export]
macro_rules! message {
    ($($arg:tt)*) => {
        $crate::logging::messenger().message(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! diagnostic {
    ($($arg:tt)*) => {
        $crate::logging::messenger().diagnostic(&format!($($arg)*))
    };
}
