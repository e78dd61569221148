use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id:         Option<String>,
    pub properties: Option<DatasetProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProperties {
    #[serde(rename = "type")]
    pub kind: Option<DatasetKind>,
}

/// The `properties.type` discriminator of a data factory dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DatasetKind {
    AzureBlob,
    AzurePostgreSqlTable,
    Binary,
    CustomDataset,
    DelimitedText,
    DocumentDbCollection,
    HttpFile,
    Json,
    MySqlTable,
    Parquet,
    SnowflakeTable,
    SqlServerTable,
    Other(String),
}

impl From<String> for DatasetKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "AzureBlob" => DatasetKind::AzureBlob,
            "AzurePostgreSqlTable" => DatasetKind::AzurePostgreSqlTable,
            "Binary" => DatasetKind::Binary,
            "CustomDataset" => DatasetKind::CustomDataset,
            "DelimitedText" => DatasetKind::DelimitedText,
            "DocumentDbCollection" => DatasetKind::DocumentDbCollection,
            "HttpFile" => DatasetKind::HttpFile,
            "Json" => DatasetKind::Json,
            "MySqlTable" => DatasetKind::MySqlTable,
            "Parquet" => DatasetKind::Parquet,
            "SnowflakeTable" => DatasetKind::SnowflakeTable,
            "SqlServerTable" => DatasetKind::SqlServerTable,
            _ => DatasetKind::Other(kind),
        }
    }
}
