use crate::types::{Artist, GetSeveralArtistsResponse, UserProfile};

use super::{ApiError, SpotifyClient};

impl SpotifyClient {
    /// Retrieves artist metadata (including genres) for up to 50 ids.
    ///
    /// Unknown ids come back as `null` from the API and are dropped.
    pub async fn get_several_artists(&self, ids: &[String]) -> Result<Vec<Artist>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let api_url = self.endpoint(&format!("/artists?ids={ids}", ids = ids.join(",")));
        let json = self.get_json::<GetSeveralArtistsResponse>(&api_url).await?;
        Ok(json.artists.into_iter().flatten().collect())
    }

    pub async fn get_current_user(&self) -> Result<UserProfile, ApiError> {
        self.get_json::<UserProfile>(&self.endpoint("/me")).await
    }
}
