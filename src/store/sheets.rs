use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::{position_of_key, RecordStore, RowHandle, RowMap, StoreError};
use crate::records::columns;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: [[&'a str; 1]; 1],
}

/// Candidate sheet stored in a spreadsheet service exposing the
/// `v4/spreadsheets/{id}/values/{range}` REST interface.
#[derive(Debug, Clone)]
pub struct SheetsRecordStore {
    http: Client,
    api_base: Url,
    spreadsheet_id: String,
    worksheet: String,
    token: String,
}

impl SheetsRecordStore {
    pub fn new(
        api_base: &str,
        spreadsheet_id: String,
        worksheet: String,
        token: String,
    ) -> Result<Self, StoreError> {
        let api_base = Url::parse(api_base).map_err(|e| {
            StoreError::Configuration(format!("invalid store.api_base '{api_base}': {e}"))
        })?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            api_base,
            spreadsheet_id,
            worksheet,
            token,
        })
    }

    fn range(&self, cells: &str) -> String {
        format!("'{}'!{}", self.worksheet.replace('\'', "''"), cells)
    }

    fn values_url(&self, range: &str) -> Result<Url, StoreError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Configuration("store.api_base cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    async fn get_values(&self, cells: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let range = self.range(cells);
        let url = self.values_url(&range)?;
        debug!(%range, "Reading spreadsheet values");

        let body: ValueRange = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn put_value(&self, row: usize, col: usize, value: &str) -> Result<(), StoreError> {
        let range = self.range(&format!("{}{}", column_letters(col), row));
        let url = self.values_url(&range)?;
        debug!(%range, "Writing spreadsheet cell");

        self.http
            .put(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueUpdate {
                range: &range,
                major_dimension: "ROWS",
                values: [[value]],
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn column_index(&self, column: &str) -> Result<usize, StoreError> {
        self.read_header_row()
            .await?
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))
    }
}

#[async_trait]
impl RecordStore for SheetsRecordStore {
    #[instrument(skip(self), fields(worksheet = %self.worksheet))]
    async fn read_all(&self) -> Result<Vec<RowMap>, StoreError> {
        let mut values = self.get_values("A1:ZZ").await?.into_iter();
        let Some(header) = values.next() else {
            return Ok(Vec::new());
        };

        let rows: Vec<RowMap> = values
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| {
                header
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| !name.trim().is_empty())
                    .map(|(i, name)| {
                        (name.trim().to_string(), row.get(i).cloned().unwrap_or_default())
                    })
                    .collect()
            })
            .collect();
        info!(rows = rows.len(), "Read candidate sheet");
        Ok(rows)
    }

    async fn find_row(&self, key: &str) -> Result<Option<RowHandle>, StoreError> {
        let mut values = self.get_values("A1:ZZ").await?.into_iter();
        let header = values.next().unwrap_or_default();
        let key_col = header
            .iter()
            .position(|h| h.trim() == columns::FILE)
            .ok_or_else(|| StoreError::MissingColumn(columns::FILE.to_string()))?;
        let keys: Vec<String> = values
            .map(|row| row.get(key_col).cloned().unwrap_or_default())
            .collect();
        Ok(position_of_key(keys.iter().map(String::as_str), key))
    }

    async fn read_header_row(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .get_values("1:1")
            .await?
            .into_iter()
            .next()
            .unwrap_or_default())
    }

    async fn read_cell(&self, row: RowHandle, column: &str) -> Result<String, StoreError> {
        let col = self.column_index(column).await?;
        let cell = format!("{}{}", column_letters(col), row.0);
        Ok(self
            .get_values(&cell)
            .await?
            .into_iter()
            .next()
            .and_then(|r| r.into_iter().next())
            .unwrap_or_default())
    }

    #[instrument(skip(self, value), fields(row = row.0))]
    async fn write_cell(
        &self,
        row: RowHandle,
        column: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let col = self.column_index(column).await?;
        self.put_value(row.0, col, value).await
    }

    async fn ensure_column(&self, column: &str) -> Result<(), StoreError> {
        let header = self.read_header_row().await?;
        if header.iter().any(|h| h.trim() == column) {
            return Ok(());
        }
        self.put_value(1, header.len(), column).await?;
        info!(column, "Added missing column to spreadsheet header");
        Ok(())
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Zero-based column index to A1 letters (0 -> "A", 26 -> "AA").
pub fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
