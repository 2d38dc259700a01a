// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod auth_state;
pub mod collection;
pub mod domains;
pub mod reactivity;

pub use app_state::*;
pub use auth_state::*;
pub use collection::*;
pub use domains::*;
pub use reactivity::*;
