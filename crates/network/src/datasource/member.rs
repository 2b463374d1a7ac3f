use async_trait::async_trait;
use model::{MemberDataSource, Nickname, Outcome, ProfileImage, User};
use serde_json::json;

use crate::{ApiClient, ApiRequest, MultipartFile};

const ME_PATH: &str = "/api/members/me";
const NAME_PATH: &str = "/api/members/me/name";
const PROFILE_IMAGE_PATH: &str = "/api/members/me/profile";

/// Form field the server reads the uploaded profile image from.
const PROFILE_IMAGE_FIELD: &str = "profile";

pub struct MemberDataSourceImpl {
    client: ApiClient,
}

impl MemberDataSourceImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemberDataSource for MemberDataSourceImpl {
    async fn get_user(&self) -> Outcome<User> {
        self.client.call(ApiRequest::get(ME_PATH)).await
    }

    async fn update_nickname(&self, nickname: &Nickname) -> Outcome<()> {
        let request = ApiRequest::patch(NAME_PATH).json(json!({ "name": nickname.as_str() }));
        self.client.call_discarding(request).await
    }

    async fn update_profile_image(&self, image: &ProfileImage) -> Outcome<()> {
        let request = ApiRequest::patch(PROFILE_IMAGE_PATH).multipart(MultipartFile {
            field: PROFILE_IMAGE_FIELD.to_owned(),
            bytes: image.bytes.clone(),
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
        });
        self.client.call_discarding(request).await
    }

    async fn delete_account(&self) -> Outcome<()> {
        self.client.call_discarding(ApiRequest::delete(ME_PATH)).await
    }
}
