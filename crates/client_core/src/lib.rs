pub mod debounce;
pub mod error;
pub mod form;
pub mod list_store;
pub mod session;
pub mod transport;

pub use error::ClientError;
pub use form::{FormField, FormMode, StudentDraft};
pub use list_store::RefreshOutcome;
pub use session::{
    AutoConfirm, ConfirmDelete, DeleteOutcome, SessionEvent, SessionView, StudentSession,
    SubmitOutcome,
};
pub use transport::{HttpTransport, StudentTransport};
