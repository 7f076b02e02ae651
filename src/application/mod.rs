// Application layer: forms, the session shell and the views it exposes.
// The CLI talks only to `Session`.

pub mod error;
pub mod forms;
pub mod session;
pub mod views;

pub use error::*;
pub use forms::*;
pub use session::*;
pub use views::*;
