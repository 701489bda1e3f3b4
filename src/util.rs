use rand::Rng;

/// Any username with something other than whitespace in it.
pub fn is_username_valid(s: &str) -> bool {
    !s.trim().is_empty()
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A random stock picture for events created without an image.
pub fn placeholder_image_url() -> String {
    let id: u32 = rand::thread_rng().gen_range(0..1000);
    format!("https://picsum.photos/id/{}/800/600", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(is_username_valid("student1"));
        assert!(is_username_valid("Nguyễn Văn A"));
        assert!(is_username_valid("o'brien"));
        assert!(!is_username_valid("   "));
        assert!(!is_username_valid(""));
    }
}
