use crate::types::{
    AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, Paging, Playlist,
    PlaylistTrackItem, RemoveTracksFromPlaylistRequest, SnapshotResponse, Track, TrackUri,
};

use super::{ApiError, SpotifyClient};

const PLAYLISTS_PAGE_LIMIT: u32 = 50;
const PLAYLIST_ITEMS_PAGE_LIMIT: u32 = 100;

impl SpotifyClient {
    /// Retrieves all playlists of the current user, following `next` links.
    pub async fn get_user_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        let mut url = Some(self.endpoint(&format!(
            "/me/playlists?limit={limit}",
            limit = PLAYLISTS_PAGE_LIMIT
        )));
        let mut playlists = Vec::new();

        while let Some(page_url) = url {
            let page = self.get_json::<Paging<Playlist>>(&page_url).await?;
            playlists.extend(page.items);
            url = page.next;
        }

        Ok(playlists)
    }

    /// Retrieves every track of a playlist in playlist order.
    ///
    /// Removed entries and local files carry no catalog id and are skipped.
    pub async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, ApiError> {
        let mut url = Some(self.endpoint(&format!(
            "/playlists/{id}/tracks?limit={limit}",
            id = playlist_id,
            limit = PLAYLIST_ITEMS_PAGE_LIMIT
        )));
        let mut tracks = Vec::new();

        while let Some(page_url) = url {
            let page = self.get_json::<Paging<PlaylistTrackItem>>(&page_url).await?;
            tracks.extend(page.items.into_iter().filter_map(|item| item.into_track()));
            url = page.next;
        }

        Ok(tracks)
    }

    /// Removes every occurrence of the given URIs from a playlist.
    pub async fn remove_playlist_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<String, ApiError> {
        let api_url = self.endpoint(&format!("/playlists/{id}/tracks", id = playlist_id));
        let body = RemoveTracksFromPlaylistRequest {
            tracks: uris.iter().map(|uri| TrackUri { uri: uri.clone() }).collect(),
        };

        let response = self
            .execute(|http| http.delete(&api_url).json(&body))
            .await?;
        let json = response.json::<SnapshotResponse>().await?;
        Ok(json.snapshot_id)
    }

    /// Creates a playlist owned by `user_id`.
    pub async fn create_user_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        let api_url = self.endpoint(&format!("/users/{user_id}/playlists", user_id = user_id));

        let response = self
            .execute(|http| http.post(&api_url).json(request))
            .await?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    /// Adds URIs to a playlist, at `position` or at the end. The API accepts
    /// at most 100 per call.
    pub async fn add_playlist_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<usize>,
    ) -> Result<String, ApiError> {
        let api_url = self.endpoint(&format!("/playlists/{id}/tracks", id = playlist_id));
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
            position,
        };

        let response = self
            .execute(|http| http.post(&api_url).json(&body))
            .await?;
        let json = response.json::<SnapshotResponse>().await?;
        Ok(json.snapshot_id)
    }
}
