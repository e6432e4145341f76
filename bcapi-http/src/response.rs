//! Decoding blockchain API responses into contracts and domain models.

use bcapi::ResultValidationError;
use bcapi::proto::BlockchainErrorResponse;
use http::StatusCode;
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Decodes a success body into the contract `T`.
///
/// # Errors
///
/// - [`HttpError::Blockchain`] if the server answered with a non-success
///   status and a recognizable [`BlockchainErrorResponse`]
/// - [`HttpError::Status`] for any other non-success response
/// - [`HttpError::Json`] if a success body is not a valid `T`
/// - [`HttpError::ResponseBodyRead`] if the body cannot be read
pub async fn read_contract<T>(response: Response) -> Result<T, HttpError>
where
    T: DeserializeOwned,
{
    let (status, body) = read_success_body(response).await?;
    serde_json::from_str(&body).map_err(|source| HttpError::Json { status, source })
}

/// Decodes a success body into a contract and builds a domain model from it.
///
/// An empty body or a JSON `null` reaches `build` as `None`, leaving the
/// builder to report the missing result.
///
/// # Errors
///
/// Everything [`read_contract`] returns, plus [`HttpError::Client`] when
/// `build` rejects the contract.
///
/// # Example
///
/// ```no_run
/// use bcapi::models::WalletBalance;
/// use bcapi::proto::WalletBalanceContract;
///
/// # async fn run(response: reqwest::Response) -> Result<(), bcapi_http::HttpError> {
/// let balance = bcapi_http::read_model(response, |contract: Option<WalletBalanceContract>| {
///     WalletBalance::from_contract(contract, 7)
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn read_model<C, M, F>(response: Response, build: F) -> Result<M, HttpError>
where
    C: DeserializeOwned,
    F: FnOnce(Option<C>) -> Result<M, ResultValidationError>,
{
    let (status, body) = read_success_body(response).await?;
    let contract = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<Option<C>>(&body)
            .map_err(|source| HttpError::Json { status, source })?
    };
    build(contract).map_err(|e| HttpError::Client(e.into()))
}

/// Reads the body, turning non-success responses into errors.
async fn read_success_body(response: Response) -> Result<(StatusCode, String), HttpError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| HttpError::ResponseBodyRead { status, source })?;

    if status.is_success() {
        Ok((status, body))
    } else {
        Err(classify_failure(status, body))
    }
}

/// Maps a non-success body to a business error when it carries one.
fn classify_failure(status: StatusCode, body: String) -> HttpError {
    match serde_json::from_str::<BlockchainErrorResponse>(&body) {
        Ok(response)
            if response.error_code.is_well_known()
                || !response.error_message.trim().is_empty() =>
        {
            HttpError::Blockchain {
                status,
                error: response.into(),
            }
        }
        _ => HttpError::Status { status, body },
    }
}
