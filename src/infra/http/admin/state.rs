use std::sync::Arc;

use crate::application::admin::{
    analytics::AdminAnalyticsService, chrome::AdminChromeService,
    submissions::AdminSubmissionsService,
};
use crate::application::repos::HealthRepo;

#[derive(Clone)]
pub struct AdminState {
    pub chrome: Arc<AdminChromeService>,
    pub analytics: Arc<AdminAnalyticsService>,
    pub submissions: Arc<AdminSubmissionsService>,
    pub health: Arc<dyn HealthRepo>,
}
