use async_trait::async_trait;
use gloo::net::http::{
  Request,
  RequestBuilder,
  Response
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use taskboard_core::GatewayError;
use taskboard_core::TaskGateway;
use taskboard_core::gateway::endpoints;
use taskboard_shared::{
  AddTaskResponse,
  ChecklistTaskCreate,
  ColumnCreate,
  ColumnDto,
  ScheduleArgs,
  TaskDto,
  TaskPayload
};

/// Talks to the task server over
/// `fetch`. Holds nothing but the base
/// URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGateway {
  base: String
}

impl HttpGateway {
  pub fn new(
    base: impl Into<String>
  ) -> Self {
    Self { base: base.into() }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base)
  }

  async fn get_json<T>(
    &self,
    path: &str
  ) -> Result<T, GatewayError>
  where
    T: DeserializeOwned
  {
    let url = self.url(path);
    tracing::debug!(%url, "GET");
    let response =
      checked(Request::get(&url).send().await)
        .await?;
    decode(response).await
  }

  async fn send_json<B>(
    &self,
    builder: RequestBuilder,
    body: &B
  ) -> Result<Response, GatewayError>
  where
    B: Serialize + ?Sized
  {
    let request =
      builder.json(body).map_err(|e| {
        GatewayError::Network(format!(
          "failed to encode body: {e}"
        ))
      })?;
    checked(request.send().await).await
  }

  async fn delete(
    &self,
    path: &str
  ) -> Result<(), GatewayError> {
    let url = self.url(path);
    tracing::debug!(%url, "DELETE");
    checked(
      Request::delete(&url).send().await
    )
    .await
    .map(|_| ())
  }
}

/// Non-success statuses become
/// `Rejected` with the raw body text.
async fn checked(
  sent: Result<Response, gloo::net::Error>
) -> Result<Response, GatewayError> {
  let response = sent.map_err(|e| {
    GatewayError::Network(e.to_string())
  })?;
  if response.ok() {
    return Ok(response);
  }

  let status = response.status();
  let body =
    response.text().await.unwrap_or_default();
  Err(GatewayError::Rejected { status, body })
}

async fn decode<T>(
  response: Response
) -> Result<T, GatewayError>
where
  T: DeserializeOwned
{
  response.json::<T>().await.map_err(|e| {
    GatewayError::Decode(e.to_string())
  })
}

#[async_trait(?Send)]
impl TaskGateway for HttpGateway {
  async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, GatewayError> {
    self.get_json(endpoints::TASKS).await
  }

  async fn create_task(
    &self,
    payload: &TaskPayload
  ) -> Result<TaskDto, GatewayError> {
    let url = self.url(endpoints::TASKS);
    let response = self
      .send_json(Request::post(&url), payload)
      .await?;
    decode(response).await
  }

  async fn update_task(
    &self,
    id: u64,
    payload: &TaskPayload
  ) -> Result<TaskDto, GatewayError> {
    let url = self.url(&endpoints::task(id));
    let response = self
      .send_json(Request::put(&url), payload)
      .await?;
    decode(response).await
  }

  async fn delete_task(
    &self,
    id: u64
  ) -> Result<(), GatewayError> {
    self.delete(&endpoints::task(id)).await
  }

  async fn list_columns(
    &self
  ) -> Result<Vec<ColumnDto>, GatewayError> {
    self.get_json(endpoints::COLUMNS).await
  }

  async fn create_column(
    &self,
    column: &ColumnCreate
  ) -> Result<ColumnDto, GatewayError> {
    let url = self.url(endpoints::COLUMNS);
    let response = self
      .send_json(Request::post(&url), column)
      .await?;
    decode(response).await
  }

  async fn list_checklist_tasks(
    &self
  ) -> Result<Vec<TaskDto>, GatewayError> {
    self.get_json(endpoints::GET_TASKS).await
  }

  async fn add_checklist_task(
    &self,
    create: &ChecklistTaskCreate
  ) -> Result<TaskDto, GatewayError> {
    let url = self.url(endpoints::ADD_TASK);
    let response = self
      .send_json(Request::post(&url), create)
      .await?;
    decode::<AddTaskResponse>(response)
      .await
      .map(|added| added.task)
  }

  async fn delete_checklist_task(
    &self,
    id: u64
  ) -> Result<(), GatewayError> {
    self
      .delete(&endpoints::delete_task(id))
      .await
  }

  async fn schedule_task(
    &self,
    args: &ScheduleArgs
  ) -> Result<(), GatewayError> {
    let url =
      self.url(endpoints::UPDATE_TASK);
    self
      .send_json(Request::post(&url), args)
      .await
      .map(|_| ())
  }
}
