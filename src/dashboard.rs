//! Renders the account dashboard: who is signed in, which providers are
//! linked, and the actions available for each.
//!
//! Rendering is a pure function of the templates and the [`Account`]; it
//! does no I/O and always yields the same page for the same account.

use serde::Serialize;
use tera::{Context, Tera};

use crate::model::{Account, Provider};

pub const TEMPLATE: &str = "dashboard.html";

/// One provider section of the dashboard.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProviderView<'a> {
    pub slug: &'static str,
    pub name: &'static str,
    pub linked: bool,
    /// Present exactly when `linked` is.
    pub account_name: Option<&'a str>,
    /// Starts the provider's linking flow.
    pub link_url: String,
    pub unlink_url: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DashboardView<'a> {
    pub username: &'a str,
    pub providers: Vec<ProviderView<'a>>,
    pub delete_account_url: &'static str,
    pub logout_url: &'static str,
}

impl<'a> DashboardView<'a> {
    pub fn new(account: &'a Account) -> DashboardView<'a> {
        let providers = Provider::LINKABLE
            .into_iter()
            .map(|provider| {
                let link = account.link(provider);
                ProviderView {
                    slug: provider.slug(),
                    name: provider.name(),
                    linked: link.is_linked(),
                    account_name: link.username(),
                    link_url: format!("/link{}", provider.slug()),
                    unlink_url: format!("/unlink?service={}", provider.slug()),
                }
            })
            .collect();

        DashboardView {
            username: &account.display_name,
            providers,
            delete_account_url: "/deleteaccount",
            logout_url: "/logout",
        }
    }

    pub fn context(&self) -> tera::Result<Context> {
        Context::from_serialize(self)
    }
}

pub fn render(templates: &Tera, account: &Account) -> tera::Result<String> {
    let context = DashboardView::new(account).context()?;
    templates.render(TEMPLATE, &context)
}
