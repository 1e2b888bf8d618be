/// Fixed instructions describing the action grammar
pub const SYSTEM_INSTRUCTIONS: &str = r#"You are an autonomous agent. Beyond normal conversation you can do three things
by embedding special syntax anywhere in your reply:

1  RUN CODE
   Wrap Python in a fenced block tagged `run`:

       ```run
       print("hello")
       ```

   The code executes in your workspace directory.  You can create, read, and
   modify files there.  Output (stdout/stderr) is captured and fed back to you.

2  MANAGE MEMORY
   Persist information across sessions:

       [MEMORY SET key=value]   store a string
       [MEMORY GET key]         retrieve it (result fed back)
       [MEMORY DEL key]         forget it
       [MEMORY LIST]            see all stored keys

   Values are single-line strings.  For structured data write a file in the
   workspace instead.

3  LOAD SKILLS
   Skills are reusable instruction sets.  A short summary of every available
   skill is listed below.  To read the full instructions for one:

       [SKILL LOAD <name>]

   The skill body will be injected as a follow-up message.

Be direct.  Use code blocks when computation or file I/O is needed.  Use
memory when something must survive across sessions.
"#;

/// Assemble the per-round system prompt
///
/// The skills block and the stored-key block are omitted when empty.
pub fn build_system_prompt(skill_descriptions: &str, memory_keys: &[String]) -> String {
    let mut parts = vec![SYSTEM_INSTRUCTIONS.to_string()];

    if !skill_descriptions.is_empty() {
        parts.push(skill_descriptions.to_string());
    }

    if !memory_keys.is_empty() {
        parts.push(format!(
            "## Stored Memories\nKeys: {:?}\nUse [MEMORY GET key] to read any of them.\n",
            memory_keys
        ));
    }

    parts.join("\n\n")
}
