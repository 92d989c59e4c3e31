//! Destination host normalization.

use url::{Host, Url};

/// Lower-case a host and strip surrounding whitespace and one trailing root dot.
pub fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.to_lowercase()
}

/// Extract the destination host from a request target.
///
/// Targets with a scheme (`https://host/path`) are parsed as URLs. Anything
/// else is treated as a tunnel target (`host:port`) and cut at the first `:`.
/// Returns an empty string when no host can be recovered.
pub fn extract_domain(target: &str) -> String {
    if !target.contains("://") {
        let host = target.split(':').next().unwrap_or_default();
        return normalize_domain(host);
    }

    let Ok(parsed) = Url::parse(target.trim()) else {
        return String::new();
    };

    match parsed.host() {
        Some(Host::Domain(d)) => normalize_domain(d),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_root_dot() {
        assert_eq!(normalize_domain("API.OpenAI.com."), "api.openai.com");
        assert_eq!(normalize_domain("  claude.ai "), "claude.ai");
        assert_eq!(normalize_domain("example.com"), "example.com");
    }

    #[test]
    fn extract_from_https_url() {
        assert_eq!(
            extract_domain("https://api.openai.com/v1/chat/completions"),
            "api.openai.com"
        );
    }

    #[test]
    fn extract_from_url_with_port_and_mixed_case() {
        assert_eq!(extract_domain("http://Chat.DeepSeek.com:8080/x"), "chat.deepseek.com");
    }

    #[test]
    fn extract_from_connect_target() {
        assert_eq!(extract_domain("claude.ai:443"), "claude.ai");
        assert_eq!(extract_domain("GEMINI.google.com"), "gemini.google.com");
    }

    #[test]
    fn extract_ip_hosts() {
        assert_eq!(extract_domain("http://10.1.2.3/path"), "10.1.2.3");
        assert_eq!(extract_domain("http://[::1]:8080/"), "::1");
    }

    #[test]
    fn extract_unparseable_url_is_empty() {
        assert_eq!(extract_domain("http://"), "");
        assert_eq!(extract_domain(""), "");
    }
}
