//! Section rendering pipeline.
//!
//! Turns stored sections, already ordered by the content store, into the
//! views the page template iterates over. The mapping is one-to-one except for
//! sections that cannot be rendered, which are dropped without disturbing the
//! order of their neighbours.

use metrics::counter;

use crate::domain::design::safe_css_value;
use crate::domain::entities::SectionRecord;
use crate::domain::icons::FeatureIcon;
use crate::domain::links::{safe_href, safe_image_src};
use crate::domain::sections::{
    ContactFormContent, FeaturesContent, HeroContent, SectionContent, TextBlockContent,
};
use crate::presentation::views::{
    ContactFormView, FeatureItemView, FeaturesView, HeroView, SectionView, TextBlockView,
};

pub const METRIC_SECTIONS_SKIPPED: &str = "vitrine_sections_skipped_total";

pub const CONTACT_FORM_ACTION: &str = "/contact";
const DEFAULT_CONTACT_TITLE: &str = "Get in Touch";
const DEFAULT_SUBMIT_LABEL: &str = "Send Message";

pub fn render_sections(sections: &[SectionRecord]) -> Vec<SectionView> {
    sections
        .iter()
        .filter_map(|section| {
            let view = render_section(&section.content);
            if view.is_none() {
                counter!(METRIC_SECTIONS_SKIPPED, "type" => section.content.tag().to_string())
                    .increment(1);
            }
            view
        })
        .collect()
}

/// Render one section, or `None` when its content has no view.
pub fn render_section(content: &SectionContent) -> Option<SectionView> {
    match content {
        SectionContent::Hero(hero) => Some(SectionView::Hero(hero_view(hero))),
        SectionContent::Features(features) => Some(SectionView::Features(features_view(features))),
        SectionContent::TextBlock(block) => Some(SectionView::TextBlock(text_block_view(block))),
        SectionContent::ContactForm(form) => {
            Some(SectionView::ContactForm(contact_form_view(form)))
        }
        SectionContent::Unrecognized { .. } | SectionContent::Malformed { .. } => None,
    }
}

fn hero_view(hero: &HeroContent) -> HeroView {
    HeroView {
        title: hero.title.clone(),
        subtitle: hero.subtitle.clone(),
        cta_text: hero.cta_text.clone(),
        cta_href: safe_href(&hero.cta_link),
        style: hero
            .background_color
            .as_deref()
            .and_then(safe_css_value)
            .map(|color| format!("background-color: {color}")),
    }
}

fn features_view(features: &FeaturesContent) -> FeaturesView {
    FeaturesView {
        title: features.title.clone(),
        items: features
            .features
            .iter()
            .map(|item| FeatureItemView {
                icon: FeatureIcon::resolve(&item.icon),
                title: item.title.clone(),
                description: item.description.clone(),
            })
            .collect(),
    }
}

fn text_block_view(block: &TextBlockContent) -> TextBlockView {
    TextBlockView {
        title: block.title.clone(),
        body_html: block.content.as_str().to_string(),
        image_src: block.image_url.as_deref().and_then(safe_image_src),
    }
}

fn contact_form_view(form: &ContactFormContent) -> ContactFormView {
    ContactFormView {
        title: non_blank(form.title.as_deref())
            .unwrap_or_else(|| DEFAULT_CONTACT_TITLE.to_string()),
        description: non_blank(form.description.as_deref()),
        submit_label: non_blank(form.submit_label.as_deref())
            .unwrap_or_else(|| DEFAULT_SUBMIT_LABEL.to_string()),
        action: CONTACT_FORM_ACTION.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
