//! End-to-end fixtures for the coupling rule, run through the full
//! parse, bind and lint pipeline.

use reflint_rules::Linter;

fn message_ids(source: &str) -> Vec<&'static str> {
    let linter = Linter::new();
    let diagnostics = linter.lint_source(source).unwrap();
    diagnostics.iter().map(|d| d.message_id).collect()
}

const BOTH: &[&str] = &["avoidInternalEffect", "avoidParentChildCoupling"];

#[test]
fn internal_state_forwarded_to_parent() {
    let source = "\
function ChildComponent(onFetched) {
    const [data, setData] = useState(null);
    useEffect(() => {
        onFetched(data);
    }, [onFetched, data]);
    return null;
}
";
    assert_eq!(message_ids(source), BOTH);
}

#[test]
fn aliased_callback_forwarded_to_parent() {
    let source = "\
function ChildComponent(onFetched) {
    const [data, setData] = useState(null);
    const onFetchedWrapper = onFetched;
    useEffect(() => {
        onFetchedWrapper(data);
    }, [onFetchedWrapper, data]);
    return null;
}
";
    assert_eq!(message_ids(source), BOTH);
}

#[test]
fn form_closing_notifies_parent() {
    let source = "\
function Form(onClose) {
    const [name, setName] = useState('');
    const [isOpen, setIsOpen] = useState(true);
    useEffect(() => {
        if (!isOpen) {
            onClose(name);
        }
    }, [isOpen]);
    return null;
}
";
    assert_eq!(message_ids(source), BOTH);
}

#[test]
fn external_data_still_couples_but_is_not_internal() {
    let source = "\
function ChildComponent(onFetched) {
    const data = useSomeAPI();
    useEffect(() => {
        onFetched(data);
    }, [onFetched, data]);
    return null;
}
";
    assert_eq!(message_ids(source), vec!["avoidParentChildCoupling"]);
}

#[test]
fn submit_of_state_snapshot_couples() {
    let source = "\
function Editor(onSubmit) {
    const [dataToSubmit, setDataToSubmit] = useState(null);
    useEffect(() => {
        onSubmit(dataToSubmit);
    }, [dataToSubmit]);
    return null;
}
";
    assert_eq!(message_ids(source), BOTH);
}

#[test]
fn namespaced_member_callback_couples() {
    let source = "\
function Dialog(events, isOpen) {
    useEffect(() => {
        if (!isOpen) {
            events.onClose();
        }
    }, [isOpen]);
    return null;
}
";
    assert_eq!(message_ids(source), BOTH);
}

#[test]
fn reset_to_defaults_on_prop_change_couples() {
    let source = "\
function Form(isOpen) {
    const [name, setName] = useState('');
    const [age, setAge] = useState(0);
    useEffect(() => {
        setName('');
        setAge(0);
    }, [isOpen]);
    return null;
}
";
    assert_eq!(message_ids(source), BOTH);
}

#[test]
fn partial_reset_does_not_couple() {
    let source = "\
function Form(isOpen) {
    const [name, setName] = useState('');
    const [age, setAge] = useState(0);
    useEffect(() => {
        setName('');
    }, [isOpen]);
    return null;
}
";
    assert_eq!(message_ids(source), vec!["avoidInternalEffect"]);
}

#[test]
fn effect_on_external_input_is_clean() {
    let source = "\
function Feed(query) {
    const results = useSomeAPI(query);
    const [page, setPage] = useState(1);
    useEffect(() => {
        render(results, page);
    }, [results]);
    return null;
}
";
    assert_eq!(message_ids(source), Vec::<&str>::new());
}

#[test]
fn effect_without_dependency_array_is_skipped() {
    let source = "\
function ChildComponent(onFetched) {
    const [data, setData] = useState(null);
    useEffect(() => {
        onFetched(data);
    });
    return null;
}
";
    assert_eq!(message_ids(source), Vec::<&str>::new());
}

#[test]
fn non_effect_calls_are_ignored() {
    let source = "\
function App(onDone) {
    const [data, setData] = useState(0);
    useMemo(() => onDone(data), [data]);
    return null;
}
";
    assert_eq!(message_ids(source), Vec::<&str>::new());
}

#[test]
fn multiple_effects_report_in_source_order() {
    let source = "\
function Panel(onChange) {
    const [a, setA] = useState(0);
    const [b, setB] = useState(0);
    useEffect(() => {
        onChange(a);
    }, [a]);
    useEffect(() => {
        log(b);
    }, [b]);
    return null;
}
";
    let ids = message_ids(source);
    assert_eq!(
        ids,
        vec![
            "avoidInternalEffect",
            "avoidParentChildCoupling",
            "avoidInternalEffect",
        ]
    );
}

#[test]
fn repeated_runs_are_identical() {
    let source = "\
function ChildComponent(onFetched) {
    const [data, setData] = useState(null);
    useEffect(() => {
        onFetched(data);
    }, [onFetched, data]);
    return null;
}
";
    assert_eq!(message_ids(source), message_ids(source));
}
