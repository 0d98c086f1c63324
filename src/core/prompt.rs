pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript_text}";

pub const DEFAULT_TUTORIAL_TEMPLATE: &str = "Create a comprehensive tutorial based on the provided transcript. \
Begin by analyzing the content of the transcript thoroughly to identify its core themes, key concepts, and main points. \
Break down the information into logical sections or chapters that flow in a structured and coherent manner. \
Ensure each section focuses on one main idea or topic to maintain clarity and engagement. \
Use simple and precise language to explain complex ideas. \
Start each section with an overview of the objectives and end with a summary or key takeaways. \
Include actionable steps or exercises after each topic to reinforce learning and provide practical applications. \
Conclude with a recap of the entire tutorial, highlighting the main points and encouraging readers to apply their newfound knowledge. \
Ensure the tutorial is easy to navigate by using subheadings and providing a logical progression of topics. \
Use plain formatting only. Transcript: {transcript_text}";

pub fn render_prompt(template: &str, transcript_text: &str) -> String {
    template.replace(TRANSCRIPT_PLACEHOLDER, transcript_text)
}
