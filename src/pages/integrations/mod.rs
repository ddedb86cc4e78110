// pages/integrations - API access, automations and bank links.
// These pages read no request state and are prerendered.
pub mod api;
pub mod automations;
pub mod link;
