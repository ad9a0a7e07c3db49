pub mod category_view;
pub mod directory;
pub mod home_cards;
pub mod icon_view;
pub mod loader;
pub mod resource_card;
pub mod search_results;
pub mod sidebar;
pub mod stats_panel;
