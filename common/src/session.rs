//! アプリケーション状態機械
//!
//! Idle → ImageLoaded → Analyzing → Resolved / Failed
//!
//! 画像読み込みと解析はどちらも非同期なので、開始時に世代番号つきの
//! チケットを発行し、完了時に世代が一致しない結果は捨てる。
//! リセット後に返ってきた古いレスポンスが新しい状態を上書きしないようにするため。

use crate::error::{Error, Result};
use crate::image::ImageRecord;
use crate::types::AnalysisResult;

/// 画面の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Idle,
    ImageLoaded,
    Analyzing,
    Resolved(AnalysisResult),
    Failed(String),
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Idle => "idle",
            AppState::ImageLoaded => "image-loaded",
            AppState::Analyzing => "analyzing",
            AppState::Resolved(_) => "resolved",
            AppState::Failed(_) => "failed",
        }
    }
}

/// 画像読み込みのチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

/// 解析リクエストのチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

/// 状態機械本体
///
/// `H` は画像の表示ハンドル。画像を差し替え・リセットした時点でdropされる。
#[derive(Debug)]
pub struct Session<H> {
    state: AppState,
    image: Option<ImageRecord<H>>,
    /// 状態を変えない入力エラー（画像以外のファイルなど）
    notice: Option<String>,
    read_generation: u64,
    analysis_generation: u64,
}

impl<H> Default for Session<H> {
    fn default() -> Self {
        Self {
            state: AppState::Idle,
            image: None,
            notice: None,
            read_generation: 0,
            analysis_generation: 0,
        }
    }
}

impl<H> Session<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn image(&self) -> Option<&ImageRecord<H>> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            AppState::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// 表示中のエラー（解析失敗または入力エラー）
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            AppState::Failed(message) => Some(message),
            _ => self.notice.as_deref(),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.state == AppState::Analyzing
    }

    /// 画像を受け付ける状態か（解析中・結果表示中は不可）
    pub fn can_load_image(&self) -> bool {
        matches!(
            self.state,
            AppState::Idle | AppState::ImageLoaded | AppState::Failed(_)
        )
    }

    /// 解析を開始できるか
    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && matches!(self.state, AppState::ImageLoaded | AppState::Failed(_))
    }

    /// 画像読み込み開始
    ///
    /// 以前のチケットはこの時点で無効になる
    pub fn begin_image_read(&mut self) -> Result<ReadTicket> {
        if !self.can_load_image() {
            return Err(Error::InvalidTransition(format!(
                "cannot load an image while {}",
                self.state.as_str()
            )));
        }
        self.read_generation += 1;
        Ok(ReadTicket(self.read_generation))
    }

    /// 画像読み込み完了
    ///
    /// 古いチケットの結果は捨てて `false` を返す。
    /// 読み込み失敗時は既存の画像・状態を残したままエラーだけ表示する。
    pub fn finish_image_read(&mut self, ticket: ReadTicket, result: Result<ImageRecord<H>>) -> bool {
        if ticket.0 != self.read_generation || !self.can_load_image() {
            tracing::debug!(ticket = ticket.0, current = self.read_generation, "Discarding stale image read");
            return false;
        }

        match result {
            Ok(record) => {
                tracing::debug!(mime_type = %record.mime_type, from = self.state.as_str(), "Image loaded");
                self.image = Some(record);
                self.state = AppState::ImageLoaded;
                self.notice = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Image read failed");
                self.notice = Some(e.user_message());
            }
        }
        true
    }

    /// 同期的に画像をセット（begin + finish）
    pub fn load_image(&mut self, record: ImageRecord<H>) -> Result<()> {
        let ticket = self.begin_image_read()?;
        self.finish_image_read(ticket, Ok(record));
        Ok(())
    }

    /// 受け付けない入力を報告（状態は変えない）
    pub fn reject_input(&mut self, error: Error) {
        tracing::debug!(error = %error, "Input rejected");
        self.notice = Some(error.user_message());
    }

    /// 解析開始
    ///
    /// 解析中・画像なしの場合は何もせず `None`。
    /// 返す画像は表示ハンドルを外したコピー（非同期処理に持ち出すため）。
    pub fn begin_analysis(&mut self) -> Option<(AnalysisTicket, ImageRecord)> {
        if !self.can_analyze() {
            return None;
        }
        let payload = self.image.as_ref()?.detached();

        self.analysis_generation += 1;
        self.read_generation += 1;
        self.notice = None;
        self.state = AppState::Analyzing;
        tracing::debug!(ticket = self.analysis_generation, "Analysis started");
        Some((AnalysisTicket(self.analysis_generation), payload))
    }

    /// 解析完了
    ///
    /// 解析中でない、またはチケットが古い場合は捨てて `false`。
    /// 失敗時も画像は残すので、そのまま再解析できる。
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<AnalysisResult>,
    ) -> bool {
        if self.state != AppState::Analyzing || ticket.0 != self.analysis_generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.analysis_generation,
                state = self.state.as_str(),
                "Discarding stale analysis result"
            );
            return false;
        }

        self.state = match result {
            Ok(result) => AppState::Resolved(result),
            Err(e) => AppState::Failed(e.user_message()),
        };
        tracing::debug!(state = self.state.as_str(), "Analysis finished");
        true
    }

    /// エラーを閉じる（画像は残す）
    pub fn dismiss_error(&mut self) {
        self.notice = None;
        if let AppState::Failed(_) = self.state {
            self.state = if self.image.is_some() {
                AppState::ImageLoaded
            } else {
                AppState::Idle
            };
        }
    }

    /// 初期状態に戻す
    ///
    /// 実行中の読み込み・解析の結果はすべて無効になる
    pub fn reset(&mut self) {
        tracing::debug!(from = self.state.as_str(), "Reset");
        self.image = None;
        self.notice = None;
        self.state = AppState::Idle;
        self.read_generation += 1;
        self.analysis_generation += 1;
    }
}
