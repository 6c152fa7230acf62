//! Caption Form Common Library
//!
//! CLIとWeb(WASM)で共有されるフォーム状態機械・型・ユーティリティ

pub mod config;
pub mod data_uri;
pub mod error;
pub mod form;
pub mod types;

pub use config::{ClientConfig, CAPTION_PATH, REQUEST_TIMEOUT};
pub use data_uri::encode_data_uri;
pub use error::{interpret_response, CaptionError, Error, FailureReport, Result};
pub use form::{FileHandle, FormPhase, SelectionTicket, SubmitRejected, SubmitTicket, Submission, UploadForm};
pub use types::{CaptionResponse, ErrorBody, ImageKind, SelectedFile, ACCEPT_ATTRIBUTE, IMAGE_FIELD};
