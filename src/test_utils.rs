#[cfg(test)]
pub mod test_helpers {
    use std::time::{Duration, Instant};

    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::config::Config;

    /// Config with no service URL, so workers answer every request with an error
    pub fn offline_config() -> Config {
        let mut config = Config::default();
        config.service.base_url = String::new();
        config
    }

    pub fn test_app() -> App {
        App::new(offline_config(), None)
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    pub fn ctrl(c: char) -> KeyEvent {
        key_with_mods(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key_at(key(KeyCode::Char(c)), now);
        }
    }

    /// Tick the app until `done` holds or the timeout passes
    ///
    /// Ticks use `now`, so only worker responses move things forward.
    pub fn tick_until(
        app: &mut App,
        now: Instant,
        timeout_ms: u64,
        done: impl Fn(&App) -> bool,
    ) -> bool {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        while Instant::now() < deadline {
            app.tick(now);
            if done(app) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }
}
