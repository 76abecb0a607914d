/// muse.ai APIクライアント
///
/// 全エンドポイントのメソッドは `request` を経由し、
/// リクエスト構築とレスポンス正規化は1か所にまとまっています。
///
/// 連続して呼び出す場合は、レート制限を避けるため呼び出し間に
/// 短い待機（0.5ms 程度）を入れることを推奨します。クライアント自身は待機しません。
use crate::api::auth::ApiKey;
use crate::api::error::InfraError;
use crate::api::types::{
    ApiRequest, ApiResponse, CoverSource, Insight, Payload, UpdateOutcome, UploadFile,
    VideoUpdate, Visibility,
};
use crate::config::APP_CONFIG;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// APIキーを載せるヘッダー名
pub const API_KEY_HEADER: &str = "Key";

/// CDNのURLに使われるFIDの長さ
///
/// FIDはファイルのSHA-256（64文字）に乱数が付くことがあるため切り詰める。
const FID_URL_LENGTH: usize = 64;

/// クライアント設定（生成後は不変）
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: String,
    cdn_url: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl ClientConfig {
    /// APP_CONFIG の既定値でクライアント設定を作成
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            base_url: APP_CONFIG.api.endpoint.to_string(),
            cdn_url: APP_CONFIG.api.cdn_endpoint.to_string(),
            connect_timeout: Duration::from_millis(APP_CONFIG.api.connect_timeout_ms),
            timeout: Duration::from_secs(APP_CONFIG.api.timeout_seconds),
        }
    }

    /// APIのベースURLを差し替える（末尾の `/` は補完される）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_cdn_url(mut self, cdn_url: impl Into<String>) -> Self {
        self.cdn_url = cdn_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cdn_url(&self) -> &str {
        &self.cdn_url
    }
}

/// muse.ai APIクライアント
///
/// 内部状態を持たないため、複数タスクから共有して呼び出せます。
/// アイドル接続は保持しません。
#[derive(Debug, Clone)]
pub struct MuseClient {
    config: ClientConfig,
    http: Client,
}

impl MuseClient {
    /// 新しいAPIクライアントを作成
    ///
    /// 接続タイムアウトは短く、全体タイムアウトは大きな動画のアップロードを想定して長く取る。
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .http1_only()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ---- コレクション ----

    /// コレクション一覧
    pub async fn list_collections(&self) -> ApiResponse {
        self.request(ApiRequest::get("files/collections")).await
    }

    /// コレクション詳細
    pub async fn get_collection(&self, scid: &str) -> ApiResponse {
        self.request(ApiRequest::get(format!("files/collections/{}", scid)))
            .await
    }

    /// コレクションを作成
    pub async fn create_collection(&self, name: &str, visibility: Visibility) -> ApiResponse {
        let mut body = Map::new();
        body.insert("name".into(), Value::String(name.to_string()));
        body.insert("visibility".into(), Value::String(visibility.to_string()));

        self.request(ApiRequest::post("files/collections").with_payload(Payload::Json(body)))
            .await
    }

    /// コレクションを削除
    ///
    /// 既に削除済みのIDでは muse.ai のエラーが `Failure` として返る。
    pub async fn delete_collection(&self, scid: &str) -> ApiResponse {
        self.request(ApiRequest::delete(format!("files/collections/{}", scid)))
            .await
    }

    // ---- 動画 ----

    /// 動画をアップロード
    ///
    /// 対応形式: AVI, MOV, MP4, OGG, WMV, WEBM, MKV, 3GP, M4V, MPEG
    ///
    /// # Arguments
    /// * `file` - 動画ファイル
    /// * `collection` - 追加先コレクションのSCID（空文字列は指定なし扱い）
    /// * `visibility` - 公開範囲（未指定時は muse.ai 側の既定値 private）
    pub async fn upload_video(
        &self,
        file: UploadFile,
        collection: Option<&str>,
        visibility: Option<Visibility>,
    ) -> ApiResponse {
        let mut fields = Vec::new();
        if let Some(scid) = collection.filter(|s| !s.trim().is_empty()) {
            fields.push(("collection".to_string(), scid.to_string()));
        }
        if let Some(visibility) = visibility {
            fields.push(("visibility".to_string(), visibility.to_string()));
        }

        self.request(
            ApiRequest::post("files/upload").with_payload(Payload::Multipart { file, fields }),
        )
        .await
    }

    /// 動画のメタデータを更新
    ///
    /// 更新内容が空の場合は通信せずに `UpdateOutcome::NoChanges` を返す。
    pub async fn update_video(&self, fid: &str, update: VideoUpdate) -> UpdateOutcome {
        if update.is_empty() {
            debug!(fid, "update_video: nothing to change");
            return UpdateOutcome::NoChanges;
        }

        let request = ApiRequest::post(format!("files/set/{}", fid))
            .with_payload(Payload::Json(update.to_json()));
        UpdateOutcome::Sent(self.request(request).await)
    }

    /// 動画を削除（FIDで指定）
    pub async fn delete_video(&self, fid: &str) -> ApiResponse {
        self.request(ApiRequest::delete(format!("files/delete/{}", fid)))
            .await
    }

    /// アカウントの動画一覧
    pub async fn list_videos(&self) -> ApiResponse {
        self.request(ApiRequest::get("files/videos")).await
    }

    /// 動画詳細（SVIDで指定、FIDではない）
    pub async fn get_video(&self, svid: &str) -> ApiResponse {
        self.request(ApiRequest::get(format!("files/videos/{}", svid)))
            .await
    }

    /// 動画が取り込み処理中かどうか
    ///
    /// `ingesting` フィールドが無い場合は処理中ではないとみなす。
    pub async fn is_video_ingesting(&self, svid: &str) -> ApiResponse<bool> {
        self.get_video(svid)
            .await
            .map(|video| video.get("ingesting").is_some_and(is_truthy))
    }

    /// カバー画像（サムネイル）を変更
    ///
    /// 対応形式: PNG, JPEG, JPG
    /// 非公開の動画ではカバー画像のURLは404になる。
    ///
    /// # Arguments
    /// * `fid` - 動画のFID（SVIDではない）
    /// * `source` - 切り出す秒数、またはアップロードする画像。`None` の場合は通信しない
    pub async fn change_video_cover(
        &self,
        fid: &str,
        source: Option<CoverSource>,
    ) -> UpdateOutcome {
        let endpoint = format!("files/set/{}/cover", fid);
        let request = match source {
            None => {
                debug!(fid, "change_video_cover: nothing to change");
                return UpdateOutcome::NoChanges;
            }
            Some(CoverSource::ByTimestamp(seconds)) => {
                ApiRequest::post(format!("{}?t={}", endpoint, seconds))
            }
            Some(CoverSource::ByFile(file)) => ApiRequest::post(endpoint).with_payload(
                Payload::Multipart {
                    file,
                    fields: Vec::new(),
                },
            ),
        };

        UpdateOutcome::Sent(self.request(request).await)
    }

    // ---- 解析結果 ----

    /// 動画の解析結果（`files/i/<kind>/<svid>`）
    pub async fn get_video_insight(&self, kind: Insight, svid: &str) -> ApiResponse {
        self.request(ApiRequest::get(format!("files/i/{}/{}", kind, svid)))
            .await
    }

    pub async fn get_video_scenes(&self, svid: &str) -> ApiResponse {
        self.get_video_insight(Insight::Scenes, svid).await
    }

    pub async fn get_video_speech(&self, svid: &str) -> ApiResponse {
        self.get_video_insight(Insight::Speech, svid).await
    }

    pub async fn get_video_text(&self, svid: &str) -> ApiResponse {
        self.get_video_insight(Insight::Text, svid).await
    }

    pub async fn get_video_actions(&self, svid: &str) -> ApiResponse {
        self.get_video_insight(Insight::Actions, svid).await
    }

    pub async fn get_video_sounds(&self, svid: &str) -> ApiResponse {
        self.get_video_insight(Insight::Sounds, svid).await
    }

    pub async fn get_video_faces(&self, svid: &str) -> ApiResponse {
        self.get_video_insight(Insight::Faces, svid).await
    }

    /// サムネイル画像のURL（通信なし）
    ///
    /// 非公開の動画ではこのURLは404になる。
    pub fn thumbnail_url(&self, fid: &str, seconds: Option<u32>) -> String {
        thumbnail_url(&self.config.cdn_url, fid, seconds)
    }

    // ---- リクエスト実行 ----

    /// リクエストを送信し、レスポンスを正規化して返す
    pub async fn request(&self, request: ApiRequest) -> ApiResponse {
        self.execute(request).await.into()
    }

    async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let ApiRequest {
            endpoint,
            method,
            payload,
        } = request;
        let method_label = method.to_string();
        let mut url = self.build_url(&endpoint);

        debug!(method = %method_label, endpoint = %endpoint, multipart = payload.has_file(), "sending request");

        let builder = if method == Method::GET {
            let query = encode_query(&payload.query_pairs());
            if !query.is_empty() {
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(&query);
            }
            self.http
                .get(&url)
                .header(CONTENT_TYPE, "application/json")
        } else {
            let builder = self.http.request(method, &url);
            match payload {
                Payload::Multipart { file, fields } => {
                    let part = file.into_part().await?;
                    let form = fields
                        .into_iter()
                        .fold(Form::new().part("file", part), |form, (k, v)| form.text(k, v));
                    builder.multipart(form)
                }
                Payload::Json(body) => builder.json(&body),
                // 引数の無い DELETE やカバーの秒数指定は空配列 `[]` を送る
                Payload::Empty => builder.json(&Value::Array(Vec::new())),
            }
        };

        let response = builder
            .header(API_KEY_HEADER, self.config.api_key.expose())
            .send()
            .await
            .map_err(|e| {
                let err = InfraError::from_transport(&e, &method_label, &endpoint);
                warn!(method = %method_label, endpoint = %endpoint, error = %err, "request failed");
                err
            })?;

        let status = response.status();
        debug!(method = %method_label, endpoint = %endpoint, status = status.as_u16(), "received response");

        let body = response
            .text()
            .await
            .map_err(|e| InfraError::from_transport(&e, &method_label, &endpoint))?;

        normalize_body(&endpoint, &body).inspect_err(|err| {
            warn!(endpoint = %endpoint, status = status.as_u16(), error = %err, "request returned an error");
        })
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }
}

/// レスポンスボディを正規化
///
/// - JSONのオブジェクト/配列でなければ `UnknownResponse`
/// - `error` フィールドが空でなければ `Api`（他のフィールドは捨てる）
/// - それ以外はデコード結果をそのまま返す
pub fn normalize_body(endpoint: &str, raw: &str) -> ApiResult<Value> {
    let decoded = match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        _ => return Err(InfraError::unknown_response(raw)),
    };

    if let Some(message) = vendor_error(&decoded) {
        return Err(InfraError::api(endpoint, message));
    }

    Ok(decoded)
}

fn vendor_error(body: &Value) -> Option<String> {
    let error = body.as_object()?.get("error")?;
    if !is_truthy(error) {
        return None;
    }
    Some(match error {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    })
}

/// muse.ai のフラグ値（0/1、真偽値、文字列）を真偽に変換
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// クエリ文字列にエンコード（`application/x-www-form-urlencoded`）
pub fn encode_query(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// サムネイル画像のURLを構築
///
/// 秒数指定時はファイル名を5桁にゼロ埋めする（例: 52秒 → `00052.jpg`）。
pub fn thumbnail_url(cdn_url: &str, fid: &str, seconds: Option<u32>) -> String {
    let fid: String = fid.chars().take(FID_URL_LENGTH).collect();
    match seconds {
        Some(seconds) => format!("{}/w/{}/thumbnails/{:05}.jpg", cdn_url, fid, seconds),
        None => format!("{}/w/{}/thumbnails/thumbnail.jpg", cdn_url, fid),
    }
}
