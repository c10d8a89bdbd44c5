mod confirm;
mod delete_progress;
mod filter_bar;
mod footer;
mod header;
mod help;
mod layout;
mod list_view;
mod progress_bar;
mod stats_view;
mod theme;

pub use confirm::ConfirmDeleteView;
pub use delete_progress::DeleteProgressView;
pub use filter_bar::FilterBar;
pub use footer::Footer;
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use list_view::ListView;
pub use stats_view::StatsView;
pub use theme::Theme;
