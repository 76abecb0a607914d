/// プレゼンテーション層モジュール
///
/// コマンド結果とユーザーの橋渡しを行います。
///
/// # モジュール
/// - `input`: APIキーの入力
/// - `output`: コマンド結果とエラーの出力（人間向け・機械向け）

pub mod input;
pub mod output;
