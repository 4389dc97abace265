//! Sample catalog shipped with the player

use auralis_core::{Book, BookId, Timestamp};

/// Public-domain sample entries, in display order
///
/// The static fields here are authoritative: a stored entry with the same
/// id only contributes its resume point and recency stamp.
pub fn seed_catalog(now: Timestamp) -> Vec<Book> {
    vec![
        Book {
            id: BookId::from("sample-1"),
            title: "The War of the Worlds".to_string(),
            author: "H.G. Wells".to_string(),
            cover_url: String::new(),
            file_url: "https://archive.org/download/war_of_the_worlds_librivox/war_of_the_worlds_01_wells_64kb.mp3".to_string(),
            duration: 1450.0,
            current_time: 0.0,
            last_played: now,
            is_local: false,
        },
        Book {
            id: BookId::from("sample-2"),
            title: "Frankenstein".to_string(),
            author: "Mary Shelley".to_string(),
            cover_url: String::new(),
            file_url: "https://archive.org/download/frankenstein_1307_librivox/frankenstein_01_shelley_64kb.mp3".to_string(),
            duration: 1200.0,
            current_time: 0.0,
            last_played: now.earlier_by(10_000),
            is_local: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order_and_ids() {
        let seeds = seed_catalog(Timestamp::from_millis(100_000));
        let ids: Vec<_> = seeds.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["sample-1", "sample-2"]);
    }

    #[test]
    fn test_seeds_are_durable_remote_entries() {
        for book in seed_catalog(Timestamp::now()) {
            assert!(!book.is_local);
            assert!(book.file_url.starts_with("https://"));
            assert!(book.has_known_duration());
        }
    }

    #[test]
    fn test_second_seed_is_older() {
        let seeds = seed_catalog(Timestamp::from_millis(100_000));
        assert_eq!(seeds[1].last_played.as_millis(), 90_000);
    }
}
