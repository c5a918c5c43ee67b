pub mod floss_scraper;
pub mod image_loader;
pub mod pattern_writer;
pub mod pipeline;
pub mod reference_loader;

pub use floss_scraper::{parse_floss_table, scrape_to_file, ScrapedFloss};
pub use image_loader::{load_pixels, to_pixel_grid};
pub use pattern_writer::{write_all, RenderedFile};
pub use pipeline::{PatternPipeline, PatternRequest, PipelineReport};
pub use reference_loader::{load_from_assets, load_table, parse_table, LoadReport, SkippedRow};
