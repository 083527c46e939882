/// Install or remove the tab-close hook.
///
/// Closing or reloading the host window cannot show custom UI, so this is
/// the one interception that relies on the platform's own synchronous
/// confirmation: while a quiz is active, `beforeunload` asks the user and
/// lets the close proceed only if they confirm.
pub(super) fn close_guard_script(guard_active: bool) -> String {
    format!(
        r#"(function() {{
                    const active = {guard_active};
                    if (active) {{
                        window.onbeforeunload = (event) => {{
                            event.preventDefault();
                            event.returnValue = "";
                            return "";
                        }};
                    }} else {{
                        window.onbeforeunload = null;
                    }}
                }})();"#,
        guard_active = guard_active,
    )
}
