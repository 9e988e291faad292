//! Building favorite entries from catalog titles.

use cinetech_store::NewFavorite;

use crate::catalog::{TitleDetails, TitleSummary};

impl From<&TitleSummary> for NewFavorite {
    fn from(title: &TitleSummary) -> Self {
        NewFavorite {
            id: title.id,
            kind: title.kind,
            title: title.title.clone(),
            poster_path: title.poster_path.clone(),
            rating: title.vote_average,
            release_date: title.release_date.clone(),
        }
    }
}

impl From<&TitleDetails> for NewFavorite {
    fn from(details: &TitleDetails) -> Self {
        NewFavorite::from(&details.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinetech_common::{MediaId, MediaKind};

    #[test]
    fn test_favorite_keeps_display_fields() {
        let title = TitleSummary {
            id: MediaId::new(1399),
            kind: MediaKind::Series,
            title: "Game of Thrones".into(),
            original_title: None,
            overview: Some("Winter is coming".into()),
            release_date: Some("2011-04-17".into()),
            poster_path: Some("/got.jpg".into()),
            backdrop_path: None,
            vote_average: Some(8.4),
            popularity: None,
            genre_ids: vec![18],
        };

        let favorite = NewFavorite::from(&title);
        assert_eq!(favorite.id, MediaId::new(1399));
        assert_eq!(favorite.kind, MediaKind::Series);
        assert_eq!(favorite.poster_path.as_deref(), Some("/got.jpg"));
        assert_eq!(favorite.rating, Some(8.4));
        assert_eq!(favorite.release_date.as_deref(), Some("2011-04-17"));
    }
}
