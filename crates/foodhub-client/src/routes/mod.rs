pub mod auth;
pub mod meals;
pub mod nav;

use std::fmt;

use crate::models::Role;

/// Navigation targets of the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Meals,
    Providers,
    Provider(i64),
    Cart,
    Login,
    Register,
    ProviderDashboard,
    Admin,
}

impl Route {
    /// Where a freshly signed-in user lands.
    pub fn for_role(role: &Role) -> Self {
        match role {
            Role::Provider => Route::ProviderDashboard,
            Role::Admin => Route::Admin,
            _ => Route::Meals,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Meals => "/meals".to_string(),
            Route::Providers => "/providers".to_string(),
            Route::Provider(id) => format!("/providers/{id}"),
            Route::Cart => "/cart".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ProviderDashboard => "/provider/dashboard".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
