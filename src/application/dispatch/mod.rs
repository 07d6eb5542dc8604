//! Classification of responses and the user-facing signals they produce

pub mod classifier;
pub mod dispatcher;

pub use classifier::{classify, soft_error_message};
pub use dispatcher::{NotifyingHandler, OperationProfile, ResultDispatcher, SuccessEffect, UNEXPECTED_RESULT};
