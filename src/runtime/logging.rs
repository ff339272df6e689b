use log::LevelFilter;

use crate::config::LoggingSettings;

/// Route `log` records into tui-logger's in-memory buffer; writing to stderr
/// would tear the alternate screen.
pub fn init(settings: &LoggingSettings) {
    let level = settings.level_filter().unwrap_or(LevelFilter::Info);
    if let Err(e) = tui_logger::init_logger(level) {
        eprintln!("tunequiz: logging disabled: {e:?}");
        return;
    }
    tui_logger::set_default_level(level);
}
