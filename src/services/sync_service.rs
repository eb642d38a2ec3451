// src/services/sync_service.rs

use std::time::Duration;

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::sync::{RemoteReply, SyncData, SyncEnvelope, SyncOutcome},
};

const SYNC_TIMEOUT: Duration = Duration::from_secs(15);

// Cliente de sincronização com o endpoint remoto (Apps Script).
// Push/pull de coleções INTEIRAS, sem diff e sem merge: na subida o
// snapshot local substitui o remoto; na descida o remoto substitui o
// local (last-write-wins, limitação conhecida e documentada).
//
// Nenhum método devolve Err para fora: toda falha vira
// `SyncOutcome { success: false, message }` e fica para o usuário
// tentar de novo manualmente. Uma tentativa por chamada, sem retry.
#[derive(Clone)]
pub struct SyncService {
    store: LocalStore,
    client: reqwest::Client,
}

impl SyncService {
    pub fn new(store: LocalStore) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(SYNC_TIMEOUT).build()?;
        Ok(Self { store, client })
    }

    // Sobe o snapshot completo da organização.
    pub async fn sync_up(&self, org_id: Uuid) -> SyncOutcome {
        let Some(endpoint) = self.endpoint_for(org_id) else {
            return SyncOutcome::fail("No se ha configurado la URL del API.");
        };

        let data = match self.snapshot(org_id) {
            Ok(data) => data,
            Err(e) => return SyncOutcome::fail(format!("Error leyendo datos locales: {}", e)),
        };

        let envelope = SyncEnvelope {
            timestamp: Utc::now(),
            action: "SYNC_UP".to_string(),
            org_id,
            data,
        };
        let body = match serde_json::to_string(&envelope) {
            Ok(body) => body,
            Err(e) => return SyncOutcome::fail(format!("Error serializando datos: {}", e)),
        };

        tracing::info!("☁️ SYNC_UP para {} ({} bytes)", endpoint, body.len());

        // Content-Type text/plain de propósito: evita o preflight
        // OPTIONS contra o host do Apps Script.
        let response = match self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Sync falhou: {}", e);
                return SyncOutcome::fail(format!(
                    "Error de conexión: {}. Verifica la URL y CORS.",
                    e
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return SyncOutcome::fail(format!("HTTP Error: {}", status));
        }

        // O corpo é parseado oportunisticamente: resposta não-JSON não
        // é tratada como falha.
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<RemoteReply>(&text) {
            Ok(reply) => reply
                .message
                .unwrap_or_else(|| "Datos enviados correctamente al servidor.".to_string()),
            Err(_) => {
                tracing::warn!("Resposta do sync não era JSON válido: {}", text);
                "Datos enviados correctamente al servidor.".to_string()
            }
        };
        SyncOutcome::ok(message)
    }

    // Puxa o snapshot remoto e SOBRESCREVE todas as coleções locais.
    // Sem comparação de timestamps nem merge por registro: a última
    // descida completa ganha de qualquer edição local.
    pub async fn sync_down(&self, org_id: Uuid) -> SyncOutcome {
        let Some(endpoint) = self.endpoint_for(org_id) else {
            return SyncOutcome::fail("No se ha configurado la URL del API.");
        };

        let response = match self.client.get(&endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Sync falhou: {}", e);
                return SyncOutcome::fail(format!(
                    "Error de conexión: {}. Verifica la URL y CORS.",
                    e
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return SyncOutcome::fail(format!("HTTP Error: {}", status));
        }

        let text = response.text().await.unwrap_or_default();
        let reply: RemoteReply = match serde_json::from_str(&text) {
            Ok(reply) => reply,
            Err(_) => return SyncOutcome::fail("Respuesta del servidor no válida."),
        };

        if reply.status != "success" {
            return SyncOutcome::fail(
                reply
                    .message
                    .unwrap_or_else(|| "El servidor reportó un error.".to_string()),
            );
        }
        let Some(data) = reply.data else {
            return SyncOutcome::fail("El servidor no devolvió datos.");
        };

        tracing::warn!(
            "☁️ SYNC_DOWN: sobrescrevendo o snapshot local da organização {} ({} unidades)",
            org_id,
            data.units.len()
        );
        if let Err(e) = self.overwrite_local(org_id, &data) {
            return SyncOutcome::fail(format!("Error guardando datos locales: {}", e));
        }

        SyncOutcome::ok(
            reply
                .message
                .unwrap_or_else(|| "Datos sincronizados desde la nube.".to_string()),
        )
    }

    fn endpoint_for(&self, org_id: Uuid) -> Option<String> {
        self.store
            .find_organization(org_id)
            .ok()
            .flatten()
            .and_then(|org| org.remote_endpoint)
            .filter(|url| !url.trim().is_empty())
    }

    fn snapshot(&self, org_id: Uuid) -> Result<SyncData, AppError> {
        Ok(SyncData {
            units: self.store.units(org_id)?,
            campuses: self.store.campuses(org_id)?,
            tools: self.store.tools(org_id)?,
            warehouse: self.store.warehouse(org_id)?,
            auth: self.store.auth_data()?,
        })
    }

    fn overwrite_local(&self, org_id: Uuid, data: &SyncData) -> Result<(), AppError> {
        self.store.save_units(org_id, &data.units)?;
        self.store.save_campuses(org_id, &data.campuses)?;
        self.store.save_tools(org_id, &data.tools)?;
        self.store.save_warehouse(org_id, &data.warehouse)?;
        self.store.save_auth_data(&data.auth)?;
        Ok(())
    }
}
