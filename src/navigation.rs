//! Named routes and the navigation seam.

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Signup,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Routes that require a stored session
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home | Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that remembers every route it was sent to
#[derive(Debug, Default)]
pub struct RouteHistory {
    visited: Mutex<Vec<Route>>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.lock().last().copied()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.visited.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for RouteHistory {
    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route);
        self.lock().push(route);
    }
}
