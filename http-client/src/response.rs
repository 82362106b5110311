use crate::Result;

#[derive(Debug)]
pub struct Response(pub(crate) reqwest::Response);

impl Response {
    pub async fn text(self) -> Result<String> {
        self.0.text().await.map_err(From::from)
    }
}
