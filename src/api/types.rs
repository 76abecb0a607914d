/// API通信用の型定義
///
/// リクエスト記述子、ペイロード、正規化済みレスポンス、
/// および各エンドポイントの引数型を定義します。
use crate::api::error::InfraError;
use crate::domain::error::DomainError;
use reqwest::multipart::Part;
use reqwest::{Body, Method};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio_util::io::ReaderStream;

/// コレクション・動画の公開範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Unlisted,
    Public,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Self::Private, Self::Unlisted, Self::Public];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Unlisted => "unlisted",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == normalized)
            .ok_or_else(|| DomainError::invalid_visibility(s))
    }
}

/// 動画解析結果の種類（`files/i/<kind>/<svid>`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Insight {
    Scenes,
    Speech,
    Text,
    Actions,
    Sounds,
    Faces,
}

impl Insight {
    pub const ALL: [Insight; 6] = [
        Self::Scenes,
        Self::Speech,
        Self::Text,
        Self::Actions,
        Self::Sounds,
        Self::Faces,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scenes => "scenes",
            Self::Speech => "speech",
            Self::Text => "text",
            Self::Actions => "actions",
            Self::Sounds => "sounds",
            Self::Faces => "faces",
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Insight {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == normalized)
            .ok_or_else(|| DomainError::invalid_insight(s))
    }
}

/// アップロードするファイル（動画本体またはカバー画像）
///
/// ディスク上のファイルは送信時に開いてストリーミングするため、
/// 動画全体をメモリに載せることはありません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: Option<String>,
    content: UploadContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UploadContent {
    Bytes(Vec<u8>),
    Path { path: PathBuf, len: u64 },
}

impl UploadFile {
    /// メモリ上のバイト列から作成
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            content: UploadContent::Bytes(bytes),
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// ローカルファイルを参照する（中身は送信時に読む）
    ///
    /// MIMEタイプは拡張子から推定します（不明な場合は付与しない）。
    ///
    /// # Errors
    /// ファイルが存在しない、ディレクトリである、空である場合に DomainError を返します。
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| DomainError::file_not_found(&display))?;
        if metadata.is_dir() {
            return Err(DomainError::not_a_file(&display));
        }
        if metadata.len() == 0 {
            return Err(DomainError::empty_file(&display));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| mime_for_extension(&ext.to_lowercase()))
            .map(str::to_string);

        Ok(Self {
            file_name,
            mime,
            content: UploadContent::Path {
                path: path.to_path_buf(),
                len: metadata.len(),
            },
        })
    }

    /// 送信するバイト数
    pub fn len(&self) -> u64 {
        match &self.content {
            UploadContent::Bytes(bytes) => bytes.len() as u64,
            UploadContent::Path { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// multipart のファイルパートに変換
    ///
    /// ファイルは `Content-Length` 付きのストリームとして送る。
    pub(crate) async fn into_part(self) -> Result<Part, InfraError> {
        let part = match self.content {
            UploadContent::Bytes(bytes) => Part::bytes(bytes),
            UploadContent::Path { path, len } => {
                let file = tokio::fs::File::open(&path)
                    .await
                    .map_err(|e| InfraError::io(path.display().to_string(), e.to_string()))?;
                Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), len)
            }
        }
        .file_name(self.file_name);

        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| InfraError::network(format!("Invalid MIME type '{}': {}", mime, e))),
            None => Ok(part),
        }
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "ogg" => "video/ogg",
        "wmv" => "video/x-ms-wmv",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "3gp" => "video/3gpp",
        "mpeg" | "mpg" => "video/mpeg",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => return None,
    };
    Some(mime)
}

/// リクエストのペイロード
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// JSONボディ（GET の場合はクエリ文字列）
    Json(Map<String, Value>),
    /// ファイルを含む multipart フォーム
    Multipart {
        file: UploadFile,
        fields: Vec<(String, String)>,
    },
}

impl Payload {
    pub fn has_file(&self) -> bool {
        matches!(self, Self::Multipart { .. })
    }

    /// GET 用のクエリパラメータに展開
    ///
    /// ネストした値は `key[sub]=value` / `key[0]=value` 形式に展開し、null は省略します。
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        match self {
            Self::Empty => {}
            Self::Json(map) => {
                for (key, value) in map {
                    flatten_query(key.clone(), value, &mut pairs);
                }
            }
            Self::Multipart { fields, .. } => pairs.extend(fields.iter().cloned()),
        }
        pairs
    }
}

fn flatten_query(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key, s.clone())),
        Value::Bool(b) => out.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_query(format!("{}[{}]", key, idx), item, out);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten_query(format!("{}[{}]", key, sub), item, out);
            }
        }
    }
}

/// 1回のAPI呼び出しを表すリクエスト記述子
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: Method,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload: Payload::Empty,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }
}

/// 正規化済みのAPIレスポンス
///
/// 成功ボディか失敗のどちらか一方のみを持ちます。
/// 失敗は `InfraError` のまま保持され、表示文字列はその `Display` です
/// （muse.ai が返したエラーならその文言そのもの）。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T = Value> {
    Success(T),
    Failure(InfraError),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(body) => Some(body),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&InfraError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// 失敗メッセージ
    pub fn failure_message(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success(body) => ApiResponse::Success(f(body)),
            Self::Failure(error) => ApiResponse::Failure(error),
        }
    }

    /// 失敗を分類を保ったまま `Err` として返す
    pub fn into_result(self) -> Result<T, InfraError> {
        match self {
            Self::Success(body) => Ok(body),
            Self::Failure(error) => Err(error),
        }
    }
}

impl ApiResponse<Value> {
    /// デコード済みボディ、または `{"error": <message>}` を返す
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(body) => body.clone(),
            Self::Failure(error) => serde_json::json!({ "error": error.to_string() }),
        }
    }
}

impl<T> From<Result<T, InfraError>> for ApiResponse<T> {
    fn from(result: Result<T, InfraError>) -> Self {
        match result {
            Ok(body) => Self::Success(body),
            Err(error) => Self::Failure(error),
        }
    }
}

/// 変更系オペレーションの結果
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// リクエストを送信した
    Sent(ApiResponse),
    /// 変更内容が無いため送信しなかった
    NoChanges,
}

impl UpdateOutcome {
    pub fn is_no_changes(&self) -> bool {
        matches!(self, Self::NoChanges)
    }

    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Sent(response) => Some(response),
            Self::NoChanges => None,
        }
    }
}

/// 動画メタデータの更新内容
///
/// 空文字列や空のドメインリストは「指定なし」として扱います。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domains: Option<Vec<String>>,
}

impl VideoUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// 再生を許可するドメインを1件追加
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        if let Some(domain) = non_empty(domain.into()) {
            self.domains.get_or_insert_with(Vec::new).push(domain);
        }
        self
    }

    pub fn domains<I, S>(self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        domains.into_iter().fold(self, |update, d| update.domain(d))
    }

    pub fn is_empty(&self) -> bool {
        self.visibility.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.domains.is_none()
    }

    pub(crate) fn to_json(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// カバー画像の差し替え方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    /// 指定秒のフレームを切り出す
    ByTimestamp(u32),
    /// 画像ファイルをアップロードする
    ByFile(UploadFile),
}
