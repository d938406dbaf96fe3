//! Built-in log format definitions.

/// Nginx `combined_timed` access log line:
///
/// ```text
/// '$remote_addr - $remote_user [$time_local] "$request" '
/// '$status $body_bytes_sent "$http_referer" '
/// '"$http_user_agent" "$http_x_forwarded_for" '
/// '$request_time $upstream_response_time $pipe';
/// ```
pub(crate) const NGINX_PATTERN: &str = r#"(?x)
    ^(?P<remote_addr>\S+)\s-\s                  # client address
    (?P<remote_user>\S+)\s                      # authenticated user
    \[(?P<timestamp>[^\]]+)\]\s                 # local time
    "(?P<verb>[A-Z]+)\s                         # request method
    (?P<path>[^?\s]+)                           # path, truncated at the query string
    (?:\?\S*)?\s                                # query string, not captured
    HTTP/[\d.]+"\s                              # protocol
    (?P<status>\d+)\s                           # response status
    (?P<body_bytes_sent>\d+)\s                  # response body size
    "(?P<http_referer>[^"]*)"\s                 # Referer
    "(?P<http_user_agent>[^"]*)"\s              # User-Agent
    "(?P<http_x_forwarded_for>[^"]*)"\s         # X-Forwarded-For
    (?P<request_time>[\d.]+)\s                  # request time
    (?P<upstream_response_time>[\d.]+)          # upstream response time
    (?:\s(?P<pipe>\S+))?\s*$                    # optional pipelined-request marker
"#;

/// Timestamp layout of `$time_local`, e.g. `16/Jan/2014:13:30:30 +0000`.
pub const NGINX_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";
