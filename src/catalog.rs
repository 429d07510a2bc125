// SongCatalog holds every song on file, grouped by artist

use std::collections::HashMap;

use crate::song::Song;

/// Songs grouped by artist. Artists keep the order they were first added in,
/// and each artist's songs keep their insertion order.
#[derive(Debug, Default)]
pub struct SongCatalog {
    // (artist, songs) in first-insertion order
    artists: Vec<(String, Vec<Song>)>,
    // artist name -> position in `artists`
    index: HashMap<String, usize>,
}

impl SongCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the song under its own artist. Duplicates are kept.
    pub fn add_song(&mut self, song: Song) {
        match self.index.get(&song.artist) {
            Some(&position) => self.artists[position].1.push(song),
            None => {
                self.index.insert(song.artist.clone(), self.artists.len());
                self.artists.push((song.artist.clone(), vec![song]));
            }
        }
    }

    /// Distinct artist names, first seen first.
    pub fn artists(&self) -> Vec<&str> {
        self.artists.iter().map(|(artist, _)| artist.as_str()).collect()
    }

    /// Songs for an artist matched by exact name, empty if the artist is unknown.
    pub fn songs_for_artist(&self, artist: &str) -> &[Song] {
        match self.index.get(artist) {
            Some(&position) => &self.artists[position].1,
            None => &[],
        }
    }

    pub fn song_count(&self) -> usize {
        self.artists.iter().map(|(_, songs)| songs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bohemian_rhapsody() -> Song {
        Song::new("Queen", "Bohemian Rhapsody", "url1")
    }

    #[test]
    fn add_single_song() {
        let mut catalog = SongCatalog::new();
        catalog.add_song(bohemian_rhapsody());

        assert_eq!(catalog.song_count(), 1);
        assert_eq!(catalog.artists(), vec!["Queen"]);
        assert_eq!(catalog.songs_for_artist("Queen"), &[bohemian_rhapsody()]);
    }

    #[test]
    fn count_includes_duplicates() {
        let mut catalog = SongCatalog::new();
        for _ in 0..3 {
            catalog.add_song(bohemian_rhapsody());
        }
        catalog.add_song(Song::new("ABBA", "Waterloo", "url2"));

        assert_eq!(catalog.song_count(), 4);
        assert_eq!(catalog.songs_for_artist("Queen").len(), 3);
    }

    #[test]
    fn artists_keep_first_seen_order() {
        let mut catalog = SongCatalog::new();
        catalog.add_song(Song::new("Queen", "Bohemian Rhapsody", "url1"));
        catalog.add_song(Song::new("ABBA", "Waterloo", "url2"));
        catalog.add_song(Song::new("Queen", "Don't Stop Me Now", "url3"));
        catalog.add_song(Song::new("Journey", "Don't Stop Believin'", "url4"));

        assert_eq!(catalog.artists(), vec!["Queen", "ABBA", "Journey"]);
        let titles: Vec<&str> = catalog
            .songs_for_artist("Queen")
            .iter()
            .map(|song| song.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Bohemian Rhapsody", "Don't Stop Me Now"]);
    }

    #[test]
    fn unknown_artist_is_empty() {
        let mut catalog = SongCatalog::new();
        assert!(catalog.songs_for_artist("Queen").is_empty());
        assert!(catalog.is_empty());

        catalog.add_song(bohemian_rhapsody());
        assert!(catalog.songs_for_artist("Toto").is_empty());
        assert!(!catalog.artists().contains(&"Toto"));
    }

    #[test]
    fn artist_match_is_exact() {
        let mut catalog = SongCatalog::new();
        catalog.add_song(bohemian_rhapsody());
        catalog.add_song(Song::new("queen ", "Radio Ga Ga", "url5"));

        assert_eq!(catalog.artists(), vec!["Queen", "queen "]);
        assert_eq!(catalog.songs_for_artist("Queen").len(), 1);
        assert!(catalog.songs_for_artist("queen").is_empty());
    }
}
