use super::{Activity, Handout, Section};

pub(super) static HANDOUTS: &[Handout] = &[WEEK_1, WEEK_2];

const WEEK_1: Handout = Handout {
    id: "life-skills-week-1",
    course: "Life Skills",
    file_stem: "Life_Skills",
    week: 1,
    title: "Self-Awareness and Personal Goal Setting",
    subtitle: "Knowing where you stand before deciding where to go",
    objectives: &[
        "Describe the difference between values, strengths and habits.",
        "Complete a personal strengths inventory and identify two growth areas.",
        "Write one SMART goal for the next four weeks.",
        "Plan a weekly check-in routine to track progress toward that goal.",
    ],
    sections: &[
        Section {
            heading: "Why Self-Awareness Comes First",
            paragraphs: &[
                "Self-awareness is the ability to notice your own thoughts, feelings and \
                 behaviour as they happen, and to understand how they affect the people \
                 around you. It is the foundation for every other skill in this course.",
                "People with strong self-awareness make decisions that fit their values, \
                 recover faster from setbacks and communicate their needs more clearly. \
                 The good news is that it can be practised like any other skill.",
            ],
            points: &[
                "Internal awareness: knowing your values, passions and reactions.",
                "External awareness: understanding how others see you.",
                "Both matter, and they do not always agree.",
            ],
        },
        Section {
            heading: "Values, Strengths and Habits",
            paragraphs: &[
                "Values are the principles you use to judge what matters. Strengths are \
                 the things you do well and enjoy doing. Habits are the behaviours you \
                 repeat without much thought.",
                "Goals that line up with your values and build on your strengths are far \
                 more likely to stick. Habits are how goals turn into results.",
            ],
            points: &[
                "List five values in order of importance to you.",
                "Ask two people you trust what they think your strengths are.",
                "Notice one habit that helps you and one that holds you back.",
            ],
        },
        Section {
            heading: "Setting SMART Goals",
            paragraphs: &[
                "A SMART goal is Specific, Measurable, Achievable, Relevant and \
                 Time-bound. \"Get fitter\" is a wish; \"walk 30 minutes on four days \
                 each week until the end of term\" is a goal.",
            ],
            points: &[
                "Specific: what exactly will you do?",
                "Measurable: how will you know you did it?",
                "Achievable: is it realistic with the time you have?",
                "Relevant: does it connect to one of your values?",
                "Time-bound: when will you check whether you made it?",
            ],
        },
        Section {
            heading: "Tracking Progress",
            paragraphs: &[
                "Progress is easier to see when it is written down. A short weekly \
                 check-in, five minutes at the same time each week, keeps the goal in \
                 view and shows you when to adjust the plan.",
            ],
            points: &[
                "What did I do this week toward my goal?",
                "What got in the way?",
                "What will I do differently next week?",
            ],
        },
    ],
    key_terms: &[
        ("Self-awareness", "Noticing your own thoughts, feelings and behaviour."),
        ("Value", "A principle you use to decide what is important."),
        ("Strength", "Something you do well and find energising."),
        ("SMART goal", "A goal that is specific, measurable, achievable, relevant and time-bound."),
    ],
    activities: &[
        Activity {
            title: "Strengths Inventory",
            minutes: 15,
            steps: &[
                "Write down ten things you have done well in the past year.",
                "Circle the ones you enjoyed doing.",
                "Group the circled items and give each group a name.",
            ],
        },
        Activity {
            title: "Draft Your SMART Goal",
            minutes: 20,
            steps: &[
                "Choose one area of your life you would like to improve.",
                "Write a first version of the goal in one sentence.",
                "Check it against each SMART letter and rewrite it.",
                "Share it with a partner and ask one clarifying question each.",
            ],
        },
    ],
    reflection: &[
        "Which of your values surprised you most when you ranked them?",
        "How does your goal build on one of your strengths?",
        "What is the first small step you will take in the next 48 hours?",
    ],
};

const WEEK_2: Handout = Handout {
    id: "life-skills-week-2",
    course: "Life Skills",
    file_stem: "Life_Skills",
    week: 2,
    title: "Effective Communication and Active Listening",
    subtitle: "Being understood starts with understanding",
    objectives: &[
        "Identify the verbal and non-verbal parts of a message.",
        "Practise active listening using paraphrasing and open questions.",
        "Use \"I\" statements to express a concern without blame.",
        "Recognise common barriers to communication and how to remove them.",
    ],
    sections: &[
        Section {
            heading: "What Communication Really Is",
            paragraphs: &[
                "Communication is the exchange of meaning, not just words. A message \
                 is shaped by what is said, how it is said and what the listener \
                 already believes.",
                "Tone of voice, posture, eye contact and facial expression often carry \
                 more weight than the words themselves. When words and body language \
                 disagree, people tend to trust the body language.",
            ],
            points: &[
                "Verbal: the words you choose.",
                "Paraverbal: pace, pitch and volume.",
                "Non-verbal: posture, gestures, expression and distance.",
            ],
        },
        Section {
            heading: "Active Listening",
            paragraphs: &[
                "Active listening means giving full attention to the speaker and \
                 showing that you have understood before you respond. It slows the \
                 conversation down in a way that saves time later.",
            ],
            points: &[
                "Face the speaker and put distractions away.",
                "Paraphrase: \"So what you are saying is...\"",
                "Ask open questions that begin with what, how or tell me.",
                "Name the feeling you hear: \"That sounds frustrating.\"",
                "Hold your advice until you are asked for it.",
            ],
        },
        Section {
            heading: "Speaking Up with \"I\" Statements",
            paragraphs: &[
                "\"You\" statements tend to sound like accusations and put the listener \
                 on the defensive. \"I\" statements describe your experience and invite \
                 the other person to help solve the problem.",
                "A simple pattern: I feel (emotion) when (specific behaviour) because \
                 (impact). Could we (request)?",
            ],
            points: &[
                "Describe behaviour, not character.",
                "Keep it to one issue at a time.",
                "End with a request rather than a demand.",
            ],
        },
        Section {
            heading: "Barriers and How to Remove Them",
            paragraphs: &[
                "Most misunderstandings come from a small set of barriers. Spotting \
                 them early makes it easier to repair a conversation before it goes \
                 wrong.",
            ],
            points: &[
                "Assumptions: check them with a question.",
                "Distractions: choose the right time and place.",
                "Strong emotion: pause and return when calmer.",
                "Jargon: use words the listener already knows.",
            ],
        },
    ],
    key_terms: &[
        ("Active listening", "Attending fully and confirming understanding before replying."),
        ("Paraphrase", "Restating a message in your own words to check meaning."),
        ("Non-verbal cue", "A signal sent through body language or expression."),
        ("\"I\" statement", "A way of raising a concern that focuses on your experience."),
    ],
    activities: &[
        Activity {
            title: "Listening Triads",
            minutes: 20,
            steps: &[
                "Form groups of three: speaker, listener and observer.",
                "The speaker talks for two minutes about a recent challenge.",
                "The listener paraphrases and asks one open question.",
                "The observer notes the listener's non-verbal cues, then roles rotate.",
            ],
        },
        Activity {
            title: "Rewrite the Message",
            minutes: 15,
            steps: &[
                "Read the three \"you\" statements on the board.",
                "Rewrite each one as an \"I\" statement with a clear request.",
                "Compare versions with a partner and choose the clearest.",
            ],
        },
    ],
    reflection: &[
        "When did someone last make you feel truly heard? What did they do?",
        "Which communication barrier shows up most often in your week?",
        "Write one \"I\" statement you could use in a real conversation this week.",
    ],
};
