use crate::utils::metrics::{Method, Metrics, Status};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info};

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
    operation: &'static str,
    method: Method,
}

/// Span and request-metrics bookkeeping shared by the service layer.
#[derive(Clone, Debug)]
pub struct OperationTracer {
    name: &'static str,
    metrics: Metrics,
}

impl OperationTracer {
    pub fn new(name: &'static str, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(&name.replace('-', "_"), registry);

        Self { name, metrics }
    }

    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.name)
    }

    pub fn start(
        &self,
        operation: &'static str,
        method: Method,
        attributes: Vec<KeyValue>,
    ) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.tracer();
        let mut span = tracer
            .span_builder(operation)
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation)],
        );

        TracingContext {
            cx: Context::current_with_span(span),
            start_time,
            operation,
            method,
        }
    }

    pub fn success(&self, ctx: &TracingContext, message: &str) {
        self.complete(ctx, true, message);
    }

    pub fn failure(&self, ctx: &TracingContext, message: &str) {
        self.complete(ctx, false, message);
    }

    fn complete(&self, ctx: &TracingContext, is_success: bool, message: &str) {
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };
        let elapsed = ctx.start_time.elapsed().as_secs_f64();

        let span = ctx.cx.span();
        span.add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ {} completed: {message}", ctx.operation);
        } else {
            error!("❌ {} failed: {message}", ctx.operation);
        }

        self.metrics
            .record(ctx.operation, ctx.method.clone(), status, elapsed);

        span.end();
    }
}
