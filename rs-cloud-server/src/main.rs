use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

use serde::Deserialize;
use rs_cloud_core::model::layout::{LayoutSettings, Viewport};
use rs_cloud_core::model::session::Session;
use rs_cloud_core::CloudConfig;

/// Environment variable holding the bind address.
const ADDR_ENV: &str = "RS_CLOUD_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Largest accepted `/v1/generate` body, in bytes.
const MAX_TEXT_BYTES: usize = 64 * 1024 * 1024;

/// Struct representing query parameters for the `/v1/layout` endpoint
#[derive(Deserialize)]
struct LayoutParams {
	width: Option<f64>,
	height: Option<f64>,
	top_k: Option<usize>
}

struct SharedData {
	session: Session
}

impl LayoutParams {
	/// Applies the overrides on top of the session geometry.
	fn resolve(&self, viewport: &Viewport, settings: &LayoutSettings) -> Result<(Viewport, LayoutSettings), String> {
		let mut viewport = *viewport;
		let mut settings = *settings;

		if let Some(width) = self.width {
			viewport.width = width;
		}
		if let Some(height) = self.height {
			viewport.height = height;
		}
		if let Some(top_k) = self.top_k {
			settings.top_k = top_k;
		}

		let config = CloudConfig { viewport, layout: settings, ..CloudConfig::default() };
		config.validate().map_err(|e| e.to_string())?;
		Ok((viewport, settings))
	}
}

/// Body limit for the text extractor (actix defaults to 256 KiB).
fn text_payload_config() -> web::PayloadConfig {
	web::PayloadConfig::new(MAX_TEXT_BYTES)
}

/// HTTP POST endpoint `/v1/generate`
///
/// Stores the request body as the session text, counts it and returns
/// the new layout with its revision.
#[post("/v1/generate")]
async fn post_generate(data: web::Data<Mutex<SharedData>>, text: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	shared_data.session.set_text(text);
	let generation = shared_data.session.generate();
	info!("Generation {} with {} glyphs", generation.revision, generation.glyphs.len());
	HttpResponse::Ok().json(generation)
}

/// HTTP GET endpoint `/v1/frequency`
///
/// Returns the table of the last generation, in encounter order.
#[get("/v1/frequency")]
async fn get_frequency(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};
	HttpResponse::Ok().json(shared_data.session.table())
}

/// HTTP GET endpoint `/v1/layout`
///
/// Lays the stored table out again, optionally for another viewport
/// size or number of words.
#[get("/v1/layout")]
async fn get_layout(data: web::Data<Mutex<SharedData>>, query: web::Query<LayoutParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let session = &shared_data.session;
	match query.resolve(session.viewport(), session.settings()) {
		Ok((viewport, settings)) => HttpResponse::Ok().json(session.layout_with(&viewport, &settings)),
		Err(e) => HttpResponse::BadRequest().body(e),
	}
}

#[get("/v1/stop_words")]
async fn get_stop_words(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};
	HttpResponse::Ok().json(shared_data.session.stop_words().sorted())
}

/// Main entry point for the server.
///
/// Loads the configuration named by `RS_CLOUD_CONFIG` (defaults otherwise),
/// wraps one session in a `Mutex` and serves it on `RS_CLOUD_ADDR`
/// (`127.0.0.1:5000` by default). CORS is permissive so that browser
/// pages can call the API.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = match CloudConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			error!("{e}");
			return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
		}
	};

	let shared_data = SharedData {
		session: Session::with_config(&config),
	};
	let shared_session = web::Data::new(Mutex::new(shared_data));

	let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
	info!("Listening on {addr}");

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_session.clone())
			.app_data(text_payload_config())
			.service(post_generate)
			.service(get_frequency)
			.service(get_layout)
			.service(get_stop_words)
	})
		.bind(addr)?
		.run()
		.await
}
