mod notify_error;

pub use notify_error::{NotifyError, NotifyResult};
