use std::sync::Arc;

use rinha_gateway::infrastructure::config::settings::Config;
use rinha_gateway::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.init();

	let config = Arc::new(Config::load().expect("Failed to load configuration"));

	#[cfg(feature = "perf")]
	let profiler = pprof::ProfilerGuardBuilder::default()
		.frequency(1000)
		.blocklist(&["libc", "libgcc", "pthread", "vdso"])
		.build()
		.map_err(std::io::Error::other)?;

	let result = run(config.clone()).await;

	#[cfg(feature = "perf")]
	write_flamegraph(&profiler, config.report_url.as_deref());

	result
}

#[cfg(feature = "perf")]
fn write_flamegraph(profiler: &pprof::ProfilerGuard<'_>, path: Option<&str>) {
	let Some(path) = path else {
		return;
	};

	let written = profiler
		.report()
		.build()
		.map_err(|e| e.to_string())
		.and_then(|report| {
			let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
			report.flamegraph(file).map_err(|e| e.to_string())
		});

	match written {
		Ok(()) => log::info!("Flamegraph written to {path}"),
		Err(e) => log::error!("Failed to write flamegraph to {path}: {e}"),
	}
}
