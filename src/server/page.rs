//! Server-rendered dashboard page

use crate::core::error::DashboardResult;
use tera::{Context, Tera};

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

/// Compiled page templates
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> DashboardResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            DASHBOARD_TEMPLATE,
            include_str!("../../templates/dashboard.html"),
        )?;
        Ok(Self { tera })
    }

    /// The dashboard landing page
    pub fn dashboard(&self) -> DashboardResult<String> {
        let mut context = Context::new();
        context.insert("title", "Dashboard");
        context.insert("heading", "Dashboard");
        Ok(self.tera.render(DASHBOARD_TEMPLATE, &context)?)
    }
}
