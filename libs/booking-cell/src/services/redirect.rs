// libs/booking-cell/src/services/redirect.rs
use std::future::Future;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The user left before the timer fired.
    Manual(String),
    /// The timer fired.
    Automatic(String),
}

impl Navigation {
    pub fn target(&self) -> &str {
        match self {
            Navigation::Manual(target) | Navigation::Automatic(target) => target,
        }
    }
}

/// Leaves the confirmation screen after a fixed delay unless the user
/// navigates first.
#[derive(Debug, Clone)]
pub struct RedirectTimer {
    delay: Duration,
    target: String,
}

impl RedirectTimer {
    pub fn new(delay: Duration, target: impl Into<String>) -> Self {
        Self {
            delay,
            target: target.into(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait<F>(self, manual: F) -> Navigation
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = manual => {
                info!("User navigated to {} before redirect", self.target);
                Navigation::Manual(self.target)
            }
            _ = tokio::time::sleep(self.delay) => {
                info!("Redirecting to {} after {:?}", self.target, self.delay);
                Navigation::Automatic(self.target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_redirects_after_delay() {
        let timer = RedirectTimer::new(Duration::from_secs(5), "index.html");
        let started = tokio::time::Instant::now();

        let navigation = timer.wait(std::future::pending::<()>()).await;

        assert_eq!(navigation, Navigation::Automatic("index.html".to_string()));
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_wins() {
        let timer = RedirectTimer::new(Duration::from_secs(5), "index.html");

        let navigation = timer
            .wait(tokio::time::sleep(Duration::from_secs(1)))
            .await;

        assert_eq!(navigation, Navigation::Manual("index.html".to_string()));
    }
}
