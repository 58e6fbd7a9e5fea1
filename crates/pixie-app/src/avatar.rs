//! Profile picture fallback: remote image, then initials, then a generic icon.

use std::time::Duration;

use tracing::debug;

/// Gradient names picked for initials avatars.
pub const GRADIENTS: [&str; 7] = [
    "blue", "green", "purple", "pink", "red", "yellow", "indigo",
];

/// What to draw for a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Image(String),
    Initials {
        initials: String,
        gradient: &'static str,
    },
    Generic,
}

impl Avatar {
    /// Short badge for terminal output.
    pub fn badge(&self) -> String {
        match self {
            Avatar::Image(_) => "◉".to_string(),
            Avatar::Initials { initials, .. } => format!("({initials})"),
            Avatar::Generic => "(·)".to_string(),
        }
    }
}

/// Pick the avatar variant from what is available.
pub fn resolve_avatar(image_url: Option<&str>, image_loaded: bool, name: Option<&str>) -> Avatar {
    if let (Some(url), true) = (image_url, image_loaded) {
        return Avatar::Image(url.to_string());
    }
    match name.and_then(initials) {
        Some(initials) => {
            let len = name.map(|n| n.chars().count()).unwrap_or(0);
            Avatar::Initials {
                initials,
                gradient: GRADIENTS[len % GRADIENTS.len()],
            }
        }
        None => Avatar::Generic,
    }
}

/// First letter of each word, upper-cased, at most two.
pub fn initials(name: &str) -> Option<String> {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    (!initials.is_empty()).then_some(initials)
}

/// Check both participants' avatar URLs at once; a missing URL counts as
/// not loaded.
pub async fn check_avatars(
    http: &reqwest::Client,
    assistant_url: Option<&str>,
    user_url: Option<&str>,
) -> (bool, bool) {
    tokio::join!(
        image_available(http, assistant_url),
        image_available(http, user_url),
    )
}

async fn image_available(http: &reqwest::Client, url: Option<&str>) -> bool {
    match url {
        Some(url) => fetch_head(http, url).await,
        None => false,
    }
}

/// Whether the image at `url` can be fetched.
async fn fetch_head(http: &reqwest::Client, url: &str) -> bool {
    match http
        .head(url)
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            debug!(url, error = %e, "Avatar image unavailable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one request, answering `status` after `delay`.
    async fn slow_image_server(status: u16, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        });
        format!("http://{addr}/avatar.jpg")
    }

    #[test]
    fn loaded_image_wins() {
        let avatar = resolve_avatar(Some("https://x/y.jpg"), true, Some("Alex Rivera"));
        assert_eq!(avatar, Avatar::Image("https://x/y.jpg".into()));
    }

    #[test]
    fn failed_image_falls_back_to_initials() {
        let avatar = resolve_avatar(Some("https://x/y.jpg"), false, Some("alex rivera"));
        assert_eq!(
            avatar,
            Avatar::Initials {
                initials: "AR".into(),
                gradient: GRADIENTS[11 % 7],
            }
        );
    }

    #[test]
    fn gradient_counts_characters_not_bytes() {
        // Seven characters, eight bytes.
        let avatar = resolve_avatar(None, false, Some("Zoë Ann"));
        assert_eq!(
            avatar,
            Avatar::Initials {
                initials: "ZA".into(),
                gradient: "blue",
            }
        );
    }

    #[test]
    fn no_name_falls_back_to_generic() {
        assert_eq!(resolve_avatar(None, false, None), Avatar::Generic);
        assert_eq!(resolve_avatar(None, false, Some("   ")), Avatar::Generic);
    }

    #[test]
    fn initials_take_at_most_two_words() {
        assert_eq!(initials("mary ann evans").as_deref(), Some("MA"));
        assert_eq!(initials("Cher").as_deref(), Some("C"));
        assert_eq!(initials("  spaced   out ").as_deref(), Some("SO"));
        assert_eq!(initials(""), None);
    }

    #[test]
    fn badges() {
        assert_eq!(Avatar::Generic.badge(), "(·)");
        let avatar = resolve_avatar(None, false, Some("Enchanted Friend"));
        assert_eq!(avatar.badge(), "(EF)");
    }

    #[tokio::test]
    async fn avatar_checks_run_concurrently() {
        let delay = Duration::from_millis(800);
        let assistant = slow_image_server(200, delay).await;
        let user = slow_image_server(404, delay).await;
        let http = reqwest::Client::new();

        let started = Instant::now();
        let (assistant_loaded, user_loaded) =
            check_avatars(&http, Some(&assistant), Some(&user)).await;
        let elapsed = started.elapsed();

        assert!(assistant_loaded);
        assert!(!user_loaded);
        assert!(elapsed < Duration::from_millis(1400), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn missing_urls_are_not_loaded() {
        let http = reqwest::Client::new();
        assert_eq!(check_avatars(&http, None, None).await, (false, false));
    }
}
