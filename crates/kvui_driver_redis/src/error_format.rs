use kvui_core::KvError;

pub(crate) fn is_connection_failure(error: &redis::RedisError) -> bool {
    error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
}

pub(crate) fn describe_connect_error(error: &redis::RedisError, host: &str, port: u16) -> KvError {
    KvError::connection(connection_message(&error.to_string(), host, port))
}

/// Connection-level failures become `Connection`, everything else is a
/// rejected command.
pub(crate) fn describe_query_error(error: &redis::RedisError) -> KvError {
    if is_connection_failure(error) {
        KvError::connection(error.to_string())
    } else {
        KvError::server(error.to_string())
    }
}

fn connection_message(source: &str, host: &str, port: u16) -> String {
    let lower = source.to_ascii_lowercase();

    if lower.contains("connection refused") {
        return format!(
            "Connection refused. Check that Redis is running on {}:{}",
            host, port
        );
    }

    if lower.contains("noauth") || lower.contains("wrongpass") {
        return "Authentication required by server".to_string();
    }

    if lower.contains("timed out") {
        return format!("Connection to {}:{} timed out", host, port);
    }

    if lower.contains("failed to lookup address") || lower.contains("name or service not known")
    {
        return format!("Could not resolve host '{}'", host);
    }

    source.to_string()
}
