use super::split_at_positional;
use crate::command_line::JavaArgs;
use crate::errors::{ParseError, ParseResult};
use tracing::trace;

/// The argument following `-jar` is the jar being run, so it is never consumed as a flag value.
const JAR_FLAG: &str = "-jar";

/// JVM options that never take a separate value, even without an `=`.
/// A bare `-Dname` is not one of them and consumes the following token.
const SELF_CONTAINED_PREFIXES: [&str; 3] = ["-X", "-javaagent:", "-verbose:"];

const SYSTEM_PROPERTY_PREFIX: &str = "-D";
const JMX_ENABLE: &str = "com.sun.management.jmxremote";
const JMX_PORT: &str = "com.sun.management.jmxremote.port";
const JMX_SSL: &str = "com.sun.management.jmxremote.ssl";
const JMX_AUTHENTICATE: &str = "com.sun.management.jmxremote.authenticate";

fn is_self_contained(arg: &str) -> bool {
    arg.contains('=')
        || SELF_CONTAINED_PREFIXES
            .iter()
            .any(|prefix| arg.starts_with(prefix))
}

/// Splits `-Dname[=value]` into its name and optional value
fn system_property(arg: &str) -> Option<(&str, Option<&str>)> {
    let property = arg.strip_prefix(SYSTEM_PROPERTY_PREFIX)?;
    match property.split_once('=') {
        Some((name, value)) => Some((name, Some(value))),
        None => Some((property, None)),
    }
}

fn is_true(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// A bare `ssl`/`authenticate` property is set, otherwise only `true` (any case) enables it
fn property_enabled(value: Option<&str>) -> bool {
    value.map_or(true, is_true)
}

#[derive(Debug, Default)]
struct JmxSettings {
    enable: bool,
    port: String,
    ssl: bool,
    authenticate: bool,
}

impl JmxSettings {
    fn observe(&mut self, arg: &str) {
        let Some((name, value)) = system_property(arg) else {
            return;
        };

        match name {
            JMX_ENABLE => {
                if let Some(value) = value {
                    self.enable = is_true(value);
                }
            }
            JMX_PORT => {
                if let Some(port) = value {
                    self.port = port.to_string();
                }
            }
            JMX_SSL => self.ssl = property_enabled(value),
            JMX_AUTHENTICATE => self.authenticate = property_enabled(value),
            _ => {}
        }
    }
}

pub(super) fn extract<S: AsRef<str>>(args: &[S]) -> ParseResult<JavaArgs> {
    let mut prev_arg_is_flag = false;
    let mut jmx = JmxSettings::default();

    for (index, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        let has_flag_prefix = arg.starts_with('-');
        let self_contained = is_self_contained(arg);
        let should_skip_arg = prev_arg_is_flag || has_flag_prefix || self_contained;

        if !should_skip_arg {
            trace!(index, arg, "accepted java class name");
            let (class_name, args) = split_at_positional(args, index);
            return Ok(JavaArgs {
                class_name,
                args,
                jmx_enable: jmx.enable,
                jmx_port: jmx.port,
                jmx_ssl: jmx.ssl,
                jmx_authenticate: jmx.authenticate,
            });
        }

        jmx.observe(arg);

        prev_arg_is_flag = has_flag_prefix && !self_contained && arg != JAR_FLAG;
    }

    Err(ParseError::ClassNameNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[rstest]
    #[case::jar(
        vec!["-Xmx4000m", "-Xms4000m", "-XX:ReservedCodeCacheSize=256m", "-jar", "/opt/sheepdog/bin/myservice.jar"],
        "/opt/sheepdog/bin/myservice.jar",
        vec![]
    )]
    #[case::class(
        vec!["-Xmx4000m", "-Xms4000m", "-XX:ReservedCodeCacheSize=256m", "com.datadog.example.HelloWorld"],
        "com.datadog.example.HelloWorld",
        vec![]
    )]
    #[case::classpath_consumes_value(
        vec!["-cp", "/etc/cassandra:/usr/share/cassandra/lib/HdrHistogram-2.1.9.jar", "org.apache.cassandra.service.CassandraDaemon"],
        "org.apache.cassandra.service.CassandraDaemon",
        vec![]
    )]
    #[case::cassandra(
        vec![
            "-Xloggc:/usr/share/cassandra/logs/gc.log",
            "-ea",
            "-XX:+HeapDumpOnOutOfMemoryError",
            "-Xss256k",
            "-Dlogback.configurationFile=logback.xml",
            "-Dcassandra.logdir=/var/log/cassandra",
            "-Dcassandra.storagedir=/data/cassandra",
            "-cp",
            "/etc/cassandra:/usr/share/cassandra/lib/cassandra-driver-core-3.0.1-shaded.jar",
            "org.apache.cassandra.service.CassandraDaemon",
        ],
        "org.apache.cassandra.service.CassandraDaemon",
        vec![]
    )]
    #[case::agent_and_verbose(
        vec!["-javaagent:/opt/dd-java-agent.jar", "-verbose:gc", "kafka.Kafka", "config/server.properties"],
        "kafka.Kafka",
        vec!["config/server.properties"]
    )]
    #[case::bare_system_property_consumes_value(
        vec!["-Dfoo", "com.example.Skipped", "com.example.Main"],
        "com.example.Main",
        vec![]
    )]
    #[case::bare_jmxremote_consumes_value(
        vec!["-Dcom.sun.management.jmxremote", "-Xmx1g", "com.example.Main", "start"],
        "com.example.Main",
        vec!["start"]
    )]
    #[case::system_property_with_value(
        vec!["-Dfoo=bar", "com.example.Main"],
        "com.example.Main",
        vec![]
    )]
    #[case::jar_with_args(
        vec!["-jar", "app.jar", "--server.port=8080", "serve"],
        "app.jar",
        vec!["--server.port=8080", "serve"]
    )]
    fn test_extract_class_name(
        #[case] args: Vec<&str>,
        #[case] class_name: &str,
        #[case] rest: Vec<&str>,
    ) {
        let java = extract(&args).unwrap();
        assert_eq!(java.class_name, class_name);
        assert_eq!(java.args, strings(&rest));
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::only_options(vec!["-Xmx1g", "-version"])]
    #[case::dangling_jar(vec!["-jar"])]
    #[case::value_only(vec!["-cp", "lib/*"])]
    fn test_extract_not_found(#[case] args: Vec<&str>) {
        assert_eq!(extract(&args), Err(ParseError::ClassNameNotFound));
    }

    #[test]
    fn test_jmx_properties() {
        let args = [
            "-Dcom.sun.management.jmxremote=true",
            "-Dcom.sun.management.jmxremote.port=9010",
            "-Dcom.sun.management.jmxremote.ssl=TRUE",
            "-Dcom.sun.management.jmxremote.authenticate=false",
            "com.example.Main",
            "arg1",
        ];
        assert_eq!(
            extract(&args),
            Ok(JavaArgs {
                class_name: "com.example.Main".to_string(),
                args: strings(&["arg1"]),
                jmx_enable: true,
                jmx_port: "9010".to_string(),
                jmx_ssl: true,
                jmx_authenticate: false,
            })
        );
    }

    #[rstest]
    #[case::bare("-Dcom.sun.management.jmxremote", false)]
    #[case::true_value("-Dcom.sun.management.jmxremote=true", true)]
    #[case::mixed_case("-Dcom.sun.management.jmxremote=True", true)]
    #[case::false_value("-Dcom.sun.management.jmxremote=false", false)]
    #[case::garbage("-Dcom.sun.management.jmxremote=yes", false)]
    #[case::other_property("-Dcom.sun.management.jmxremote.local.only=true", false)]
    fn test_jmx_enable(#[case] property: &str, #[case] expected: bool) {
        // -X options are skipped whether or not the property consumed them
        let java = extract(&[property, "-Xmx1g", "Main"]).unwrap();
        assert_eq!(java.jmx_enable, expected);
    }

    #[rstest]
    #[case::bare_ssl("-Dcom.sun.management.jmxremote.ssl", true, false)]
    #[case::bare_authenticate("-Dcom.sun.management.jmxremote.authenticate", false, true)]
    #[case::ssl_suffix_not_matched("-Dcom.sun.management.jmxremote.ssl.need.client.auth=true", false, false)]
    fn test_jmx_flags(#[case] property: &str, #[case] ssl: bool, #[case] authenticate: bool) {
        let java = extract(&[property, "-Xmx1g", "Main"]).unwrap();
        assert_eq!((java.jmx_ssl, java.jmx_authenticate), (ssl, authenticate));
    }

    #[test]
    fn test_jmx_properties_after_class_name_are_ignored() {
        let args = [
            "com.example.Main",
            "-Dcom.sun.management.jmxremote=true",
            "-Dcom.sun.management.jmxremote.port=9010",
        ];
        let java = extract(&args).unwrap();
        assert!(!java.jmx_enable);
        assert_eq!(java.jmx_port, "");
        assert_eq!(java.args, strings(&args[1..]));
    }

    #[test]
    fn test_last_property_wins() {
        let args = [
            "-Dcom.sun.management.jmxremote.port=9010",
            "-Dcom.sun.management.jmxremote.port=9999",
            "Main",
        ];
        assert_eq!(extract(&args).unwrap().jmx_port, "9999");
    }
}
