use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::icons::FeatureIcon;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// The uniform not-found page. Absent, unpublished and reserved pages all end here.
pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Page not found",
    )
    .attach(&mut response);
    response
}

/// Full error page for failures that happen after the chrome was loaded.
pub fn render_error_response(chrome: LayoutChrome, error: HttpError) -> Response {
    let content = ErrorPageView::from_http_error(&error);
    let status = error.status();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, status);
    error.into_report().attach(&mut response);
    response
}

#[derive(Clone, Default)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

impl NavigationView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    /// Declarations for the layout's `:root` block.
    pub design_css: String,
}

impl LayoutChrome {
    /// Override the default meta with page-specific values.
    pub fn with_page_meta(self, title: &str, description: Option<&str>) -> Self {
        Self {
            meta: self.meta.for_page(title, description),
            ..self
        }
    }

    pub fn with_active_path(mut self, path: &str) -> Self {
        for entry in &mut self.navigation.entries {
            entry.is_active = entry.href == path;
        }
        self
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub design_css: String,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            design_css: chrome.design_css,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

impl PageMetaView {
    pub fn for_page(self, title: &str, description: Option<&str>) -> Self {
        let description = description
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or(self.description);
        let title = if title.trim().is_empty() {
            self.title
        } else {
            title.trim().to_string()
        };
        Self { title, description }
    }
}

/// One rendered section. The closed set mirrors the renderable section kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionView {
    Hero(HeroView),
    Features(FeaturesView),
    TextBlock(TextBlockView),
    ContactForm(ContactFormView),
}

impl SectionView {
    pub fn kind(&self) -> &'static str {
        match self {
            SectionView::Hero(_) => "hero",
            SectionView::Features(_) => "features",
            SectionView::TextBlock(_) => "text_block",
            SectionView::ContactForm(_) => "contact_form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_href: Option<String>,
    /// Inline `style` attribute value, present only for a safe background color.
    pub style: Option<String>,
}

impl HeroView {
    pub fn has_cta(&self) -> bool {
        self.cta_href.is_some() && !self.cta_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturesView {
    pub title: String,
    pub items: Vec<FeatureItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureItemView {
    pub icon: FeatureIcon,
    pub title: String,
    pub description: String,
}

impl FeatureItemView {
    pub fn icon_name(&self) -> &'static str {
        self.icon.name()
    }

    pub fn icon_svg(&self) -> &'static str {
        self.icon.svg()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlockView {
    pub title: String,
    /// Sanitized markup, emitted without escaping.
    pub body_html: String,
    pub image_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormView {
    pub title: String,
    pub description: Option<String>,
    pub submit_label: String,
    pub action: String,
}

pub struct PageView {
    pub title: String,
    pub sections: Vec<SectionView>,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub view: LayoutContext<PageView>,
}

pub struct ContactResultView {
    pub success: bool,
    pub title: String,
    pub message: String,
    pub field: Option<String>,
}

impl ContactResultView {
    pub fn accepted() -> Self {
        Self {
            success: true,
            title: "Message sent".to_string(),
            message: "Thank you for reaching out. We will get back to you soon.".to_string(),
            field: None,
        }
    }

    pub fn rejected(field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            title: "Message not sent".to_string(),
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

#[derive(Template)]
#[template(path = "contact_result.html")]
pub struct ContactResultTemplate {
    pub view: LayoutContext<ContactResultView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you are looking for does not exist.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }

    fn from_http_error(error: &HttpError) -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: error.public_message().to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Go Home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
