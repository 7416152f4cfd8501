use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use time::OffsetDateTime;
use tokio::sync::OnceCell;

use crate::domain::accounting::AccountingEvent;
use crate::domain::errors::GatewayError;
use crate::domain::payment::unix_millis;
use crate::domain::processor::Processor;
use crate::domain::repository::SummaryRepository;
use crate::domain::summary::SummaryData;
use crate::infrastructure::config::redis::{
	all_summary_keys, summary_data_key, summary_history_key,
};

const CONNECT_RETRIES: usize = 2;

/// Summary store backed by Redis: per processor, a hash of
/// `correlationId -> amount` and a sorted set of correlation ids scored by
/// `requestedAt` millis.
///
/// The connection is opened on first use and re-established by the
/// `ConnectionManager` whenever it drops; a failed command only fails that
/// call.
#[derive(Clone)]
pub struct RedisSummaryRepository {
	client:     Client,
	connection: Arc<OnceCell<ConnectionManager>>,
}

impl RedisSummaryRepository {
	pub fn new(client: Client) -> Self {
		Self {
			client,
			connection: Arc::new(OnceCell::new()),
		}
	}

	async fn connection(&self) -> redis::RedisResult<ConnectionManager> {
		self.connection
			.get_or_try_init(|| {
				self.client.get_connection_manager_with_config(
					ConnectionManagerConfig::new()
						.set_number_of_retries(CONNECT_RETRIES),
				)
			})
			.await
			.cloned()
	}
}

#[async_trait]
impl SummaryRepository for RedisSummaryRepository {
	async fn record_batch(
		&self,
		events: &[AccountingEvent],
	) -> Result<(), GatewayError> {
		if events.is_empty() {
			return Ok(());
		}

		let mut con = self.connection().await.map_err(GatewayError::store_write)?;

		let mut pipe = redis::pipe();
		pipe.atomic();
		for event in events {
			pipe.hset(
				summary_data_key(event.processor),
				&event.correlation_id,
				event.amount,
			)
			.ignore()
			.zadd(
				summary_history_key(event.processor),
				&event.correlation_id,
				event.timestamp_millis,
			)
			.ignore();
		}

		pipe.query_async::<()>(&mut con)
			.await
			.map_err(GatewayError::store_write)?;

		debug!("Recorded {} accounting events in Redis", events.len());
		Ok(())
	}

	async fn summary_of(
		&self,
		processor: Processor,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> Result<SummaryData, GatewayError> {
		let mut con = self.connection().await.map_err(GatewayError::store_read)?;

		let ids: Vec<String> = con
			.zrangebyscore(
				summary_history_key(processor),
				unix_millis(from),
				unix_millis(to),
			)
			.await
			.map_err(GatewayError::store_read)?;

		if ids.is_empty() {
			return Ok(SummaryData::default());
		}

		let amounts: Vec<Option<String>> = redis::cmd("HMGET")
			.arg(summary_data_key(processor))
			.arg(&ids)
			.query_async(&mut con)
			.await
			.map_err(GatewayError::store_read)?;

		let parsed = ids.iter().zip(amounts).filter_map(|(id, amount)| {
			match amount.as_deref().map(str::parse::<f64>) {
				Some(Ok(amount)) => Some(amount),
				Some(Err(e)) => {
					warn!(
						"Skipping unparseable amount for {processor} payment {id}: {e}"
					);
					None
				}
				None => {
					warn!("Indexed {processor} payment {id} has no recorded amount");
					None
				}
			}
		});

		Ok(SummaryData::from_amounts(parsed))
	}

	async fn clear(&self) -> Result<(), GatewayError> {
		let mut con = self.connection().await.map_err(GatewayError::store_write)?;

		let _: () = con
			.del(all_summary_keys())
			.await
			.map_err(GatewayError::store_write)?;

		Ok(())
	}
}
