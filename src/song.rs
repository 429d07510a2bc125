use std::{fmt, str::FromStr};

use crate::error::InputError;

/// A song on file in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub artist: String,
    pub title: String,
    /// opaque playback reference, usually a video URL
    pub media_reference: String,
}
impl Song {
    pub fn new(artist: &str, title: &str, media_reference: &str) -> Self {
        Self {
            artist: artist.to_owned(),
            title: title.to_owned(),
            media_reference: media_reference.to_owned(),
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

// parses "ARTIST|TITLE|MEDIA", used to preload songs from the command line
impl FromStr for Song {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = value.split('|').map(str::trim).collect();
        match fields.as_slice() {
            [artist, title, media]
                if !artist.is_empty() && !title.is_empty() && !media.is_empty() =>
            {
                Ok(Song::new(artist, title, media))
            }
            _ => Err(InputError::MalformedSong(value.to_owned())),
        }
    }
}

/// A singer's request to perform a song. Two requests are equal when both the
/// singer name (as typed) and the song match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRequest {
    pub singer_name: String,
    pub song: Song,
}
impl SongRequest {
    pub fn new(singer_name: &str, song: Song) -> Self {
        Self {
            singer_name: singer_name.to_owned(),
            song,
        }
    }
}
