use crate::presentation::admin::views::{AdminChrome, AdminNavigationItemView};

const NAV_ITEMS: &[(&str, &str)] = &[("/", "Analytics"), ("/submissions", "Form submissions")];

#[derive(Clone)]
pub struct AdminChromeService {
    brand_title: String,
}

impl AdminChromeService {
    pub fn new(site_brand: &str) -> Self {
        Self {
            brand_title: format!("{site_brand} Admin"),
        }
    }

    pub fn load(&self, active_path: &str) -> AdminChrome {
        let navigation: Vec<AdminNavigationItemView> = NAV_ITEMS
            .iter()
            .map(|(href, label)| AdminNavigationItemView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: *href == active_path,
            })
            .collect();

        let active_label = navigation
            .iter()
            .find(|item| item.is_active)
            .map(|item| item.label.as_str())
            .unwrap_or("Analytics");

        AdminChrome {
            page_title: format!("{} · {}", self.brand_title, active_label),
            brand_title: self.brand_title.clone(),
            navigation,
        }
    }
}
