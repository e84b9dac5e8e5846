//! Process-wide router installation.
//!
//! A framework typically builds its routes once at startup and then serves every request from the
//! same sealed [`Router`]. [`GlobalRouter`] holds that router in a `static` and refuses to be
//! installed twice.

use log::{debug, error};
use once_cell::sync::OnceCell;

use crate::{
    error::{RegistryError, Result},
    router::Router,
};

/// Install-once holder for a sealed [`Router`].
///
/// # Examples
/// ```
/// use http::Method;
/// use waymark::{global::GlobalRouter, RegistryError, RouterBuilder};
///
/// static ROUTER: GlobalRouter<&'static str> = GlobalRouter::new();
///
/// let mut builder = RouterBuilder::new();
/// builder.get("/health", "health")?;
/// ROUTER.install(builder.seal())?;
///
/// let router = ROUTER.get().unwrap();
/// assert!(router.match_route(&Method::GET, "/health").is_some());
///
/// let err = ROUTER.install(RouterBuilder::new().seal()).unwrap_err();
/// assert_eq!(err, RegistryError::AlreadyInstalled);
/// # Ok::<_, RegistryError>(())
/// ```
#[derive(Debug)]
pub struct GlobalRouter<T> {
    cell: OnceCell<Router<T>>,
}

impl<T> GlobalRouter<T> {
    /// Creates an empty holder; usable in `static` items.
    pub const fn new() -> Self {
        GlobalRouter {
            cell: OnceCell::new(),
        }
    }

    /// Installs `router`, returning a reference to it.
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyInstalled`] if a router was installed before. The
    /// previously installed router stays in place.
    pub fn install(&self, router: Router<T>) -> Result<&Router<T>> {
        let mut installed = false;

        let current = self.cell.get_or_init(|| {
            installed = true;
            router
        });

        if installed {
            debug!("router installed with {} routes", current.routes().count());
            Ok(current)
        } else {
            error!("attempted to install a second router; keeping the first one");
            Err(RegistryError::AlreadyInstalled)
        }
    }

    /// Returns the installed router, if any.
    pub fn get(&self) -> Option<&Router<T>> {
        self.cell.get()
    }

    /// Returns true once a router has been installed.
    pub fn is_installed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for GlobalRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}
