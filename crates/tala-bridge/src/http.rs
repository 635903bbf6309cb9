use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tala_types::{Settings, Shortcut};

use crate::{BridgeError, BridgeKind, HostBridge};

#[derive(Serialize)]
struct TranslationBody<'a> {
    translation: &'a str,
}

#[derive(Deserialize)]
struct TranslationReply {
    result: Option<String>,
}

#[derive(Serialize)]
struct EnableBody {
    enable: bool,
}

/// Host bridge reached over HTTP, one `POST /api/<method>` per call
#[derive(Clone)]
pub struct HttpBridge {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/api/{}", self.base_url, method)
    }

    /// Check that the host answers at all
    pub async fn probe(&self) -> Result<(), BridgeError> {
        let response = self.client.get(self.endpoint("ping")).send().await?;

        if !response.status().is_success() {
            return Err(BridgeError::Host(format!("ping: HTTP {}", response.status())));
        }

        Ok(())
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<reqwest::Response, BridgeError> {
        let response = self
            .client
            .post(self.endpoint(method))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BridgeError::Host(format!(
                "{method}: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }

    async fn post_unit<B: Serialize + ?Sized>(&self, method: &str, body: &B) -> Result<(), BridgeError> {
        self.post(method, body).await.map(|_| ())
    }

    async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R, BridgeError> {
        let response = self.post(method, body).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| BridgeError::Decode(format!("{method}: {e}")))
    }
}

#[async_trait]
impl HostBridge for HttpBridge {
    async fn translate(&self, text: &str) -> Result<String, BridgeError> {
        let reply: TranslationReply = self
            .post_json("translation", &TranslationBody { translation: text })
            .await?;

        reply
            .result
            .ok_or_else(|| BridgeError::Decode("translation: missing `result`".to_string()))
    }

    async fn update_config(&self, settings: &Settings) -> Result<(), BridgeError> {
        self.post_unit("config_update", settings).await
    }

    async fn set_auto_running(&self, enable: bool) -> Result<(), BridgeError> {
        self.post_unit("set_auto_running", &EnableBody { enable }).await
    }

    async fn set_hide_to_tray_on_start(&self, enable: bool) -> Result<(), BridgeError> {
        self.post_unit("set_hide2tray_on_start", &EnableBody { enable })
            .await
    }

    async fn modify_hotkey(&self, shortcut: &Shortcut) -> Result<Shortcut, BridgeError> {
        self.post_json("modify_hotkey", shortcut).await
    }

    async fn set_always_on_top(&self, enable: bool) -> Result<(), BridgeError> {
        self.post_unit("set_always_on_top", &EnableBody { enable }).await
    }

    async fn set_hide_to_tray_on_close(&self, enable: bool) -> Result<(), BridgeError> {
        self.post_unit("set_hide2tray_on_close", &EnableBody { enable })
            .await
    }

    async fn capture_single_screen(&self) -> Result<(), BridgeError> {
        self.post_unit("capture_single", &serde_json::json!({})).await
    }

    async fn capture_all_screens(&self) -> Result<(), BridgeError> {
        self.post_unit("capture_all", &serde_json::json!({})).await
    }

    fn kind(&self) -> BridgeKind {
        BridgeKind::Host
    }
}
