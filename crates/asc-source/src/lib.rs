/// Sources d'images pour asciinator : décodage, redimensionnement, résolveurs.

pub mod dispatch;
pub mod image;
pub mod local;
pub mod resize;
pub mod url;

pub use dispatch::Dispatcher;
pub use local::LocalResolver;
pub use url::UrlResolver;
