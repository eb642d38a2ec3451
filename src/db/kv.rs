// src/db/kv.rs

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};

use crate::common::error::AppError;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

// Armazenamento chave-valor embutido (redb). Os valores são JSON,
// espelhando o formato que o app original guardava no localStorage.
// Leitura-após-escrita é imediatamente consistente no processo; não
// há lock de leitura-modificação-escrita (o último save ganha).
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
}

impl KvStore {
    // Abre (ou cria) o banco no caminho dado.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let db = Database::create(path).map_err(|e| AppError::Storage(e.to_string()))?;

        // Garante que a tabela exista com uma transação de escrita vazia.
        let write_txn = db.begin_write().map_err(|e| AppError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(raw)) => {
                let value = serde_json::from_slice(raw.value())
                    .map_err(|e| AppError::Storage(format!("JSON corrupto em '{}': {}", key, e)))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(value).map_err(|e| AppError::Storage(e.to_string()))?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| AppError::Storage(e.to_string()))?;
            table
                .insert(key, bytes.as_slice())
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| AppError::Storage(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }

    // Remove todas as chaves com o prefixo dado. Usado pelo reset.
    pub fn remove_prefix(&self, prefix: &str) -> Result<usize, AppError> {
        let keys = self.keys_with_prefix(prefix)?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| AppError::Storage(e.to_string()))?;
            for key in &keys {
                table
                    .remove(key.as_str())
                    .map_err(|e| AppError::Storage(e.to_string()))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(keys.len())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let mut keys = Vec::new();
        let iter = table
            .range(prefix..)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        for entry in iter {
            let entry = entry.map_err(|e| AppError::Storage(e.to_string()))?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key);
        }

        Ok(keys)
    }
}
