// JNI entry points for `DDEClient.execute(String, String, String)`.

use crate::dde::{self, DdeApi, DdeError, Status, WideText};
use crate::logging;
use jni::objects::{JClass, JString};
use jni::sys::{jint, JNI_FALSE};
use jni::JNIEnv;
use log::warn;
use std::panic::AssertUnwindSafe;

/// `net.sourceforge.texlipse.DDEClient.execute`
#[no_mangle]
pub extern "system" fn Java_net_sourceforge_texlipse_DDEClient_execute<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    server: JString<'local>,
    topic: JString<'local>,
    command: JString<'local>,
) -> jint {
    execute_from_java(&mut env, &server, &topic, &command)
}

/// `org.eclipse.texlipse.DDEClient.execute`
#[no_mangle]
pub extern "system" fn Java_org_eclipse_texlipse_DDEClient_execute<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    server: JString<'local>,
    topic: JString<'local>,
    command: JString<'local>,
) -> jint {
    execute_from_java(&mut env, &server, &topic, &command)
}

fn execute_from_java(
    env: &mut JNIEnv<'_>,
    server: &JString<'_>,
    topic: &JString<'_>,
    command: &JString<'_>,
) -> jint {
    super::guarded(
        "JNI DDEClient.execute",
        AssertUnwindSafe(|| {
            let server = read_units(env, server, "server");
            let topic = read_units(env, topic, "topic");
            let command = read_units(env, command, "command");
            execute_units(
                &dde::platform(),
                server.as_deref(),
                topic.as_deref(),
                command.as_deref(),
            )
        }),
    )
}

/// Run the bridge on UTF-16 copied out of the JVM. `None` stands for a Java `null`
/// or a string that could not be read, and starts nothing.
fn execute_units<A: DdeApi>(
    api: &A,
    server: Option<&[u16]>,
    topic: Option<&[u16]>,
    command: Option<&[u16]>,
) -> Status {
    let arguments = (
        wide_argument(server, "server is null or unreadable"),
        wide_argument(topic, "topic is null or unreadable"),
        wide_argument(command, "command is null or unreadable"),
    );

    match arguments {
        (Ok(server), Ok(topic), Ok(command)) => {
            dde::execute_with(api, &server, &topic, &command)
        }
        (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
            warn!("[API] {}", err);
            err.status()
        }
    }
}

fn wide_argument(units: Option<&[u16]>, problem: &'static str) -> Result<WideText, DdeError> {
    units
        .map(WideText::from_units)
        .ok_or(DdeError::InvalidArgument(problem))
}

/// Copy the UTF-16 units of a Java string as the JVM stores them.
///
/// Goes through `GetStringLength`/`GetStringRegion` rather than the modified
/// UTF-8 view, so unpaired surrogates survive unchanged.
fn read_units(env: &mut JNIEnv<'_>, value: &JString<'_>, name: &str) -> Option<Vec<u16>> {
    if value.is_null() {
        return None;
    }

    let raw_env = env.get_raw();
    let string = value.as_raw();

    let units = unsafe {
        let table = *raw_env;
        if table.is_null() {
            return None;
        }
        let (Some(length), Some(region), Some(exception_check)) = (
            (*table).GetStringLength,
            (*table).GetStringRegion,
            (*table).ExceptionCheck,
        ) else {
            return None;
        };

        let len = length(raw_env, string).max(0);
        let mut units = vec![0u16; len as usize];
        region(raw_env, string, 0, len, units.as_mut_ptr());

        if exception_check(raw_env) != JNI_FALSE {
            None
        } else {
            Some(units)
        }
    };

    if units.is_none() {
        // The status code is the only error channel; drop the pending exception.
        let _ = env.exception_clear();
        logging::log_critical_error(
            "JNI DDEClient.execute",
            &format!("{} could not be read", name),
        );
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dde::fake::FakeDdeml;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn java_strings_reach_the_server() {
        let api = FakeDdeml::new().with_server("SUMATRA", "control");
        let (server, topic, command) = (units("SUMATRA"), units("control"), units("[x]"));

        let status = execute_units(
            &api,
            Some(server.as_slice()),
            Some(topic.as_slice()),
            Some(command.as_slice()),
        );

        assert_eq!(status, Status::Submitted);
        assert_eq!(api.executed_payloads(), vec![WideText::new("[x]").payload()]);
        assert_eq!(api.live_handles(), 0);
    }

    #[test]
    fn unpaired_surrogate_is_sent_unchanged() {
        let api = FakeDdeml::new().with_server("SUMATRA", "control");
        let (server, topic) = (units("SUMATRA"), units("control"));
        let command: [u16; 4] = [0xd800, 0x0078, 0xd83d, 0xde00];

        let status = execute_units(
            &api,
            Some(server.as_slice()),
            Some(topic.as_slice()),
            Some(command.as_slice()),
        );

        let expected: Vec<u8> = command
            .iter()
            .chain(std::iter::once(&0))
            .flat_map(|unit| unit.to_ne_bytes())
            .collect();
        assert_eq!(status, Status::Submitted);
        assert_eq!(api.executed_payloads(), vec![expected]);
    }

    #[test]
    fn java_null_starts_nothing() {
        let api = FakeDdeml::new().with_server("SUMATRA", "control");
        let (server, command) = (units("SUMATRA"), units("[x]"));

        let status = execute_units(
            &api,
            Some(server.as_slice()),
            None,
            Some(command.as_slice()),
        );

        assert_eq!(status, Status::InitializeFailed);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn null_command_starts_nothing() {
        let api = FakeDdeml::new().with_server("SUMATRA", "control");
        let (server, topic) = (units("SUMATRA"), units("control"));

        let status = execute_units(
            &api,
            Some(server.as_slice()),
            Some(topic.as_slice()),
            None,
        );

        assert_eq!(status, Status::InitializeFailed);
        assert!(api.calls().is_empty());
    }
}
